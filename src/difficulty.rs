//! Speed ramp: the pause between ticks shrinks every few hundred frames.

use fugit::MillisDurationU32;

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Difficulty {
    tick_delay: MillisDurationU32,
    frames: u32,
    step: MillisDurationU32,
    floor: MillisDurationU32,
    frames_per_step: u32,
}

impl Difficulty {
    pub const fn new(config: &GameConfig) -> Self {
        Self {
            tick_delay: config.initial_tick_delay,
            frames: 0,
            step: config.tick_delay_step,
            floor: config.min_tick_delay,
            frames_per_step: config.frames_per_step,
        }
    }

    /// Pause to wait after the current tick.
    pub const fn tick_delay(&self) -> MillisDurationU32 {
        self.tick_delay
    }

    /// Frames counted since the last speed-up.
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    /// Count a completed frame. Once `frames_per_step` frames have passed the
    /// pause drops by one step, not below the floor, and the count restarts.
    /// At the floor the count keeps climbing.
    ///
    /// Returns `true` when the pause got shorter.
    pub fn frame_done(&mut self) -> bool {
        self.frames = self.frames.saturating_add(1);
        if self.frames < self.frames_per_step {
            return false;
        }

        let shorter = self
            .tick_delay
            .ticks()
            .saturating_sub(self.step.ticks())
            .max(self.floor.ticks());
        if shorter == self.tick_delay.ticks() {
            return false;
        }
        self.frames = 0;
        self.tick_delay = MillisDurationU32::from_ticks(shorter);
        debug!("speed up: tick delay now {} ms", shorter);
        true
    }
}
