//! The winding road: one left-rail offset per page, scrolled downward with a
//! bounded random walk.

use rand_core::RngCore;

use crate::{
    display::{
        HEIGHT_PAGES,
        VirtualDisplay,
        WIDTH,
    },
    glcd::GlcdBus,
    sprites,
};

/// Gap between the left and right rail, in columns.
pub const CORRIDOR_WIDTH: u8 = 48;

/// The left rail never touches column 0.
pub const MIN_OFFSET: u8 = 1;

/// Keeps the right rail on screen.
pub const MAX_OFFSET: u8 = WIDTH - 1 - CORRIDOR_WIDTH;

const START_OFFSET: u8 = (WIDTH - 1 - CORRIDOR_WIDTH) / 2;

const PAGES: usize = HEIGHT_PAGES as usize;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CorridorTrack {
    // [0] is the top (newest) page, [7] the player's page.
    offsets: [u8; PAGES],
}

impl Default for CorridorTrack {
    fn default() -> Self {
        Self::new()
    }
}

impl CorridorTrack {
    /// A straight corridor centred on screen.
    pub const fn new() -> Self {
        Self {
            offsets: [START_OFFSET; PAGES],
        }
    }

    /// Start from explicit offsets, clamped into `MIN_OFFSET..=MAX_OFFSET`.
    pub const fn from_offsets(mut offsets: [u8; PAGES]) -> Self {
        let mut page = 0;
        while page < PAGES {
            if offsets[page] < MIN_OFFSET {
                offsets[page] = MIN_OFFSET;
            } else if offsets[page] > MAX_OFFSET {
                offsets[page] = MAX_OFFSET;
            }
            page += 1;
        }
        Self { offsets }
    }

    pub const fn offsets(&self) -> &[u8; PAGES] {
        &self.offsets
    }

    /// Left rail column at `page`.
    pub const fn left(&self, page: u8) -> u8 {
        self.offsets[page as usize]
    }

    /// Right rail column at `page`.
    pub const fn right(&self, page: u8) -> u8 {
        self.left(page).saturating_add(CORRIDOR_WIDTH)
    }

    /// Move every page down by one and grow a new top page one column to the
    /// left or right of the old one.
    pub fn scroll<R: RngCore>(&mut self, rng: &mut R) {
        self.offsets.copy_within(..PAGES - 1, 1);

        let top = &mut self.offsets[0];
        if rng.next_u32() % 2 == 1 && *top < MAX_OFFSET {
            *top += 1;
        } else if *top > MIN_OFFSET {
            *top -= 1;
        }
        trace!("corridor top at {=u8}", *top);
    }

    /// Draw both rails on every page.
    pub fn render_edges<B: GlcdBus>(&self, display: &mut VirtualDisplay<B>) -> Result<(), B::Error> {
        for page in 0..HEIGHT_PAGES {
            display.write_cell(self.left(page), page, sprites::RAIL)?;
            display.write_cell(self.right(page), page, sprites::RAIL)?;
        }
        Ok(())
    }
}
