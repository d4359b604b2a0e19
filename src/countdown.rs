//! "3, 2, 1, GO!" banner shown before the first run.

use embedded_hal_async::delay::DelayNs;
use fugit::MillisDurationU32;

use crate::{
    display::{
        VirtualDisplay,
        WIDTH,
    },
    glcd::GlcdBus,
    sprites::glyph,
};

/// Page the banner is drawn on.
pub const BANNER_PAGE: u8 = 3;

const DIGITS: [[u8; 6]; 3] = [glyph::THREE, glyph::TWO, glyph::ONE];
const GO: [[u8; 6]; 3] = [glyph::G, glyph::O, glyph::BANG];

/// Left column that centres `glyphs` glyphs on screen.
const fn centred(glyphs: u8) -> u8 {
    (WIDTH - glyphs * glyph::WIDTH) / 2
}

/// Show each digit, then "GO!", for `step` each, clearing as it goes.
pub async fn play<B: GlcdBus, D: DelayNs>(
    display: &mut VirtualDisplay<B>,
    delay: &mut D,
    step: MillisDurationU32,
) -> Result<(), B::Error> {
    info!("countdown");
    let column = centred(1);
    for digit in &DIGITS {
        display.draw_sprite(column, BANNER_PAGE, digit)?;
        delay.delay_ms(step.ticks()).await;
        display.clear_span(column, BANNER_PAGE, glyph::WIDTH)?;
    }

    let column = centred(GO.len() as u8);
    for (i, letter) in (0..).zip(&GO) {
        display.draw_sprite(column + i * glyph::WIDTH, BANNER_PAGE, letter)?;
    }
    delay.delay_ms(step.ticks()).await;
    display.clear_span(column, BANNER_PAGE, GO.len() as u8 * glyph::WIDTH)?;
    Ok(())
}
