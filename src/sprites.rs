//! Column bitmaps. Each byte is one column of a page, bit 0 on top.

/// The player's car.
pub const PLAYER: [u8; 6] = [0xE7, 0x42, 0xFF, 0xFF, 0x42, 0xE7];

/// Oncoming car.
pub const OBSTACLE: [u8; 7] = [0xE7, 0x42, 0xFF, 0xE7, 0xFF, 0x42, 0xE7];

/// 6×8 glyphs for the start countdown.
pub mod glyph {
    pub const WIDTH: u8 = 6;

    pub const THREE: [u8; 6] = [0x21, 0x41, 0x45, 0x4B, 0x31, 0x00];
    pub const TWO: [u8; 6] = [0x42, 0x61, 0x51, 0x49, 0x46, 0x00];
    pub const ONE: [u8; 6] = [0x00, 0x21, 0x7F, 0x01, 0x00, 0x00];
    pub const G: [u8; 6] = [0x3E, 0x41, 0x49, 0x49, 0x3A, 0x00];
    pub const O: [u8; 6] = [0x3E, 0x41, 0x41, 0x41, 0x3E, 0x00];
    pub const BANG: [u8; 6] = [0x00, 0x00, 0x5F, 0x00, 0x00, 0x00];
}

/// Solid one-column mark used for the corridor rails.
pub const RAIL: u8 = 0xFF;
