//! The HELLO WORLD greeting script
//!
//! A fixed sequence of 13 frames: the letters of "HELLO WORLD" with a
//! blank word gap, a smiley sign-off, and a final blank. Played as
//! alternating show/blank phases so repeated letters (the two Ls) read
//! as separate flashes instead of one long hold.

use crate::bitmap::Bitmap;
use crate::glyphs;

/// How long each greeting frame stays lit (ms).
pub const LETTER_HOLD_MS: u32 = 300;

/// Blank gap after each frame (ms).
pub const BLANK_GAP_MS: u32 = 50;

/// The greeting frames in play order.
pub const GREETING: [&Bitmap; 13] = [
    &glyphs::LETTER_H,
    &glyphs::LETTER_E,
    &glyphs::LETTER_L,
    &glyphs::LETTER_L,
    &glyphs::LETTER_O,
    &glyphs::BLANK,
    &glyphs::LETTER_W,
    &glyphs::LETTER_O,
    &glyphs::LETTER_R,
    &glyphs::LETTER_L,
    &glyphs::LETTER_D,
    &glyphs::SMILEY,
    &glyphs::BLANK,
];

/// One step of the animation: show `frame`, hold it for `hold_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase {
    pub frame: &'static Bitmap,
    pub hold_ms: u32,
}

/// The full animation as a phase sequence.
///
/// Each greeting frame is held for [`LETTER_HOLD_MS`] and followed by
/// a blank held for [`BLANK_GAP_MS`], so the sequence always ends with
/// the display dark.
pub fn phases() -> impl Iterator<Item = Phase> {
    GREETING.iter().copied().flat_map(|frame| {
        [
            Phase {
                frame,
                hold_ms: LETTER_HOLD_MS,
            },
            Phase {
                frame: &glyphs::BLANK,
                hold_ms: BLANK_GAP_MS,
            },
        ]
    })
}
