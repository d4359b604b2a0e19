//! One 128×64 screen over the two half-screen controllers.
//!
//! Callers address columns 0..128; the split at column 64 is handled here
//! and nowhere else.

use crate::glcd::{
    GlcdBus,
    HALF_COLUMNS,
    Half,
    PAGES,
    command,
};

/// Logical screen width in columns.
pub const WIDTH: u8 = 2 * HALF_COLUMNS;

/// Logical screen height in pages.
pub const HEIGHT_PAGES: u8 = PAGES;

/// Map a logical column to its controller and that controller's column.
pub const fn locate(column: u8) -> (Half, u8) {
    if column < HALF_COLUMNS {
        (Half::Left, column)
    } else {
        (Half::Right, column - HALF_COLUMNS)
    }
}

/// Unbuffered drawing surface: every call goes straight to the controllers.
pub struct VirtualDisplay<B> {
    bus: B,
}

impl<B: GlcdBus> VirtualDisplay<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Switch both controllers on and blank the screen.
    pub fn init(&mut self) -> Result<(), B::Error> {
        for half in Half::BOTH {
            self.bus.select_half(half)?;
            self.bus.send_command(command::START_LINE)?;
            self.bus.send_command(command::DISPLAY_ON)?;
        }
        self.clear()?;
        debug!("display on");
        Ok(())
    }

    /// Write one byte (8 vertical pixels) at a logical column and page.
    ///
    /// Columns past the right edge are ignored.
    pub fn write_cell(&mut self, column: u8, page: u8, pattern: u8) -> Result<(), B::Error> {
        if column >= WIDTH || page >= HEIGHT_PAGES {
            return Ok(());
        }
        let (half, physical) = locate(column);
        self.bus.select_half(half)?;
        self.bus.send_command(command::SET_PAGE | page)?;
        self.bus.send_command(command::SET_COLUMN | physical)?;
        self.bus.send_data(pattern)
    }

    pub fn clear_cell(&mut self, column: u8, page: u8) -> Result<(), B::Error> {
        self.write_cell(column, page, 0x00)
    }

    /// Write `sprite` into consecutive columns starting at `column`.
    ///
    /// Bytes past the right edge are dropped.
    pub fn draw_sprite(&mut self, column: u8, page: u8, sprite: &[u8]) -> Result<(), B::Error> {
        for (col, &pattern) in (column..WIDTH).zip(sprite) {
            self.write_cell(col, page, pattern)?;
        }
        Ok(())
    }

    /// Blank `width` columns starting at `column`.
    pub fn clear_span(&mut self, column: u8, page: u8, width: u8) -> Result<(), B::Error> {
        for offset in 0..width {
            let Some(col) = column.checked_add(offset) else {
                break;
            };
            self.clear_cell(col, page)?;
        }
        Ok(())
    }

    /// Zero every page of both controllers.
    pub fn clear(&mut self) -> Result<(), B::Error> {
        for page in 0..HEIGHT_PAGES {
            for half in Half::BOTH {
                self.bus.select_half(half)?;
                self.bus.send_command(command::SET_PAGE | page)?;
                self.bus.send_command(command::SET_COLUMN)?;
                // The column register auto-increments.
                for _ in 0..HALF_COLUMNS {
                    self.bus.send_data(0x00)?;
                }
            }
        }
        Ok(())
    }

    pub const fn bus(&self) -> &B {
        &self.bus
    }

    pub fn release(self) -> B {
        self.bus
    }
}
