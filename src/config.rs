//! Gameplay tuning.

use fugit::MillisDurationU32;

/// Timing and spawn-rate knobs for a [`GameSession`](crate::GameSession).
///
/// ```rust,ignore
/// let config = GameConfig::default()
///     .with_initial_tick_delay(MillisDurationU32::from_ticks(120))
///     .with_spawn_one_in(3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Pause between ticks at the start of a run.
    pub initial_tick_delay: MillisDurationU32,
    /// How much the pause shrinks on each speed-up.
    pub tick_delay_step: MillisDurationU32,
    /// The pause never drops below this.
    pub min_tick_delay: MillisDurationU32,
    /// Collision-free ticks between speed-ups.
    pub frames_per_step: u32,
    /// An obstacle spawn is attempted on one tick in this many.
    pub spawn_one_in: u32,
    /// Blank-screen pause after a crash.
    pub reset_pause: MillisDurationU32,
    /// How long each countdown glyph stays up.
    pub countdown_step: MillisDurationU32,
}

impl GameConfig {
    pub const fn new() -> Self {
        Self {
            initial_tick_delay: MillisDurationU32::from_ticks(160),
            tick_delay_step: MillisDurationU32::from_ticks(10),
            min_tick_delay: MillisDurationU32::from_ticks(30),
            frames_per_step: 100,
            spawn_one_in: 5,
            reset_pause: MillisDurationU32::from_ticks(120),
            countdown_step: MillisDurationU32::from_ticks(200),
        }
    }

    #[must_use]
    pub const fn with_initial_tick_delay(mut self, delay: MillisDurationU32) -> Self {
        self.initial_tick_delay = delay;
        self
    }

    #[must_use]
    pub const fn with_tick_delay_step(mut self, step: MillisDurationU32) -> Self {
        self.tick_delay_step = step;
        self
    }

    #[must_use]
    pub const fn with_min_tick_delay(mut self, floor: MillisDurationU32) -> Self {
        self.min_tick_delay = floor;
        self
    }

    #[must_use]
    pub const fn with_frames_per_step(mut self, frames: u32) -> Self {
        self.frames_per_step = frames;
        self
    }

    /// `0` and `1` both mean "try every tick".
    #[must_use]
    pub const fn with_spawn_one_in(mut self, n: u32) -> Self {
        self.spawn_one_in = n;
        self
    }

    #[must_use]
    pub const fn with_reset_pause(mut self, pause: MillisDurationU32) -> Self {
        self.reset_pause = pause;
        self
    }

    #[must_use]
    pub const fn with_countdown_step(mut self, step: MillisDurationU32) -> Self {
        self.countdown_step = step;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
