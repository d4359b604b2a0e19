//! Stock Car firmware: steer with the two buttons, stay on the road, dodge
//! the oncoming cars. A crash restarts the run at the starting speed.

#![no_std]
#![no_main]

use defmt::{
    error,
    info,
};
use embassy_executor::Spawner;
use embassy_time::{
    Delay,
    Duration,
    Timer,
};
use esp_backtrace as _;
use esp_hal::{
    gpio::{
        Input,
        Output,
    },
    rng::Rng,
    timer::timg::TimerGroup,
};
use esp_println as _;
#[allow(clippy::wildcard_imports)]
use stock_car::*;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

type Panel = VirtualDisplay<ParallelBus<Output<'static>, esp_hal::delay::Delay>>;

#[embassy_executor::task]
async fn game_task(
    display: &'static mut Panel,
    buttons: &'static mut SteerButtons<Input<'static>>,
    seed: u32,
) {
    info!("Stock Car game task started, seed {=u32:#x}", seed);

    let mut session: GameSession<XorShift32> =
        GameSession::new(GameConfig::default(), XorShift32::new(seed));
    let Err(err) = session.run(display, buttons, &mut Delay).await;
    error!("game stopped: {}", err);
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = stock_car::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 16 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let display = mk_static!(Panel, VirtualDisplay::new(resources.glcd.into()));
    display.init().unwrap();
    let buttons = mk_static!(SteerButtons<Input<'static>>, resources.buttons.into());

    let seed = Rng::new().random();
    spawner.must_spawn(game_task(display, buttons, seed));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
