//! # stock-car
//!
//! A corridor racing game for a 128×64 monochrome graphic LCD built from two
//! 64-column KS0108-style controllers.
//!
//! - **Display**: [`VirtualDisplay`] hides the controller split behind one
//!   0..128 column space, on top of any [`GlcdBus`]
//! - **Track**: [`CorridorTrack`] scrolls a 48-column road with a bounded
//!   random walk
//! - **Obstacles**: [`ObstacleField`] drops oncoming cars inside the road
//! - **Game**: [`GameSession`] ties it together with collision checks, a
//!   speed ramp and automatic restart after a crash
//!
//! With the `board` feature the crate also wires the panel and two steering
//! buttons to an ESP32-S3.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = stock_car::init();
//! let resources = stock_car::split_resources!(peripherals);
//!
//! let mut display = VirtualDisplay::new(ParallelBus::from(resources.glcd));
//! let mut buttons: SteerButtons<_> = resources.buttons.into();
//! let mut session: GameSession<_> = GameSession::new(GameConfig::default(), XorShift32::new(seed));
//!
//! display.init()?;
//! session.run(&mut display, &mut buttons, &mut embassy_time::Delay).await?;
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

#[cfg(feature = "board")]
mod board;
mod buttons;
pub mod collision;
mod config;
pub mod countdown;
mod difficulty;
pub mod display;
pub mod glcd;
pub mod obstacles;
pub mod player;
mod rng;
pub mod session;
pub mod sprites;
pub mod track;

#[cfg(test)]
mod testing;

#[cfg(feature = "board")]
pub use board::*;
pub use buttons::{
    Controls,
    Steer,
    SteerButtons,
};
pub use collision::Collision;
pub use config::GameConfig;
pub use difficulty::Difficulty;
pub use display::VirtualDisplay;
pub use glcd::{
    GlcdBus,
    Half,
    ParallelBus,
    ParallelPins,
    SimulatedPanel,
};
pub use obstacles::{
    Obstacle,
    ObstacleField,
};
pub use player::Player;
pub use rng::XorShift32;
pub use session::{
    GameSession,
    State,
    Tick,
};
#[cfg(feature = "board")]
#[doc(hidden)]
pub use static_cell;
pub use track::CorridorTrack;

/// Allocates a value into a `static` exactly once.
#[cfg(feature = "board")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: $crate::static_cell::StaticCell<$t> = $crate::static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}
