#![allow(clippy::indexing_slicing, clippy::exit, clippy::unwrap_used)]
fn main() {
    // The linker re-runs this binary as its error-handling script.
    let args: Vec<String> = std::env::args().collect();
    if let [_, kind, what, ..] = args.as_slice() {
        explain_link_error(kind, what);
    }

    if std::env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    // Host builds (tests, simulation) link normally.
    if std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default() != "xtensa" {
        return;
    }

    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!(
        "cargo:rustc-link-arg=-Wl,--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}

fn explain_link_error(kind: &str, what: &str) -> ! {
    if kind != "undefined-symbol" {
        std::process::exit(1);
    }

    let hint = match what {
        "_defmt_timestamp" => Some(
            "`defmt` not found - build the firmware with `--features board` so `esp-println` provides the logger",
        ),
        "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
        "esp_rtos_initialized" | "esp_rtos_yield_task" => {
            Some("`esp-rtos` was not started - call `esp_rtos::start` before spawning the game task")
        }
        _ => None,
    };
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("💡 {hint}");
        eprintln!();
    }

    std::process::exit(0);
}
