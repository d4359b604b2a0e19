//! ESP32-S3 wiring: which GPIO drives which panel line and button.

use esp_hal::{
    assign_resources,
    clock::CpuClock,
};

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        glcd: GlcdResources<'d> {
            d0: GPIO4,
            d1: GPIO5,
            d2: GPIO6,
            d3: GPIO7,
            d4: GPIO15,
            d5: GPIO16,
            d6: GPIO17,
            d7: GPIO18,
            rs: GPIO8,
            rw: GPIO9,
            en: GPIO10,
            cs1: GPIO11,
            cs2: GPIO12,
            rst: GPIO13,
        },
        buttons: ButtonResources<'d> {
            left: GPIO21,
            right: GPIO2,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Initialise the chip at full clock and return the raw peripheral set.
///
/// Call this once at the top of `main`, then use [`split_resources!`] to
/// break the peripherals into the panel and button groups.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}
