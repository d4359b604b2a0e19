//! The player's car on the bottom page.

use crate::{
    buttons::Steer,
    display::{
        HEIGHT_PAGES,
        VirtualDisplay,
        WIDTH,
    },
    glcd::GlcdBus,
    sprites,
};

/// Columns covered by the car sprite.
pub const PLAYER_WIDTH: u8 = sprites::PLAYER.len() as u8;

/// The car always drives on the last page.
pub const PLAYER_PAGE: u8 = HEIGHT_PAGES - 1;

/// Right-most column the car's left edge may reach.
pub const MAX_X: u8 = WIDTH - 1 - PLAYER_WIDTH;

const START_X: u8 = 61;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Player {
    x: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A car parked mid-screen.
    pub const fn new() -> Self {
        Self { x: START_X }
    }

    /// Place the car at `x`, clamped to the screen.
    pub fn at(x: u8) -> Self {
        Self { x: x.min(MAX_X) }
    }

    /// Left-most column of the car.
    pub const fn x(&self) -> u8 {
        self.x
    }

    /// Right-most column of the car.
    pub const fn right(&self) -> u8 {
        self.x + PLAYER_WIDTH - 1
    }

    /// Shift one column per held button. Holding both goes nowhere unless
    /// one of them is blocked by a screen edge.
    pub fn steer(&mut self, steer: Steer) {
        if steer.right && self.x < MAX_X {
            self.x += 1;
        }
        if steer.left && self.x > 0 {
            self.x -= 1;
        }
    }

    pub fn render<B: GlcdBus>(&self, display: &mut VirtualDisplay<B>) -> Result<(), B::Error> {
        display.draw_sprite(self.x, PLAYER_PAGE, &sprites::PLAYER)
    }
}
