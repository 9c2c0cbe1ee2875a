//! Built-in glyph set for the 8x8 matrix
//!
//! The pictures and letters the demo can show. Letter coverage is
//! exactly what the greeting needs (H, E, L, O, W, R, D, either case);
//! anything else comes back as `None` from [`for_char`].

use crate::bitmap::Bitmap;

pub const SMILEY: Bitmap = Bitmap::new([0x00, 0x08, 0x64, 0x02, 0x02, 0x64, 0x08, 0x00]);

pub const HEART: Bitmap = Bitmap::new([0x38, 0x7C, 0x7E, 0x3F, 0x3F, 0x7E, 0x7C, 0x38]);

pub const BLANK: Bitmap = Bitmap::new([0; 8]);

pub const LETTER_H: Bitmap = Bitmap::new([0x00, 0x00, 0x7F, 0x08, 0x08, 0x08, 0x7F, 0x00]);

pub const LETTER_E: Bitmap = Bitmap::new([0x00, 0x00, 0x41, 0x49, 0x49, 0x49, 0x7F, 0x00]);

pub const LETTER_L: Bitmap = Bitmap::new([0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x7F, 0x00]);

pub const LETTER_O: Bitmap = Bitmap::new([0x00, 0x00, 0x7F, 0x41, 0x41, 0x41, 0x7F, 0x00]);

pub const LETTER_W: Bitmap = Bitmap::new([0x00, 0x00, 0x7E, 0x01, 0x06, 0x01, 0x7E, 0x00]);

pub const LETTER_R: Bitmap = Bitmap::new([0x00, 0x00, 0x31, 0x4A, 0x4C, 0x48, 0x7F, 0x00]);

pub const LETTER_D: Bitmap = Bitmap::new([0x00, 0x00, 0x3E, 0x41, 0x41, 0x41, 0x7F, 0x00]);

/// Look up the glyph for a character, if the set covers it.
pub const fn for_char(ch: char) -> Option<&'static Bitmap> {
    match ch.to_ascii_uppercase() {
        'H' => Some(&LETTER_H),
        'E' => Some(&LETTER_E),
        'L' => Some(&LETTER_L),
        'O' => Some(&LETTER_O),
        'W' => Some(&LETTER_W),
        'R' => Some(&LETTER_R),
        'D' => Some(&LETTER_D),
        ' ' => Some(&BLANK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_covers_greeting_alphabet() {
        for ch in "HELLO WORLD".chars() {
            assert!(for_char(ch).is_some(), "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(for_char('h'), Some(&LETTER_H));
        assert_eq!(for_char('w'), Some(&LETTER_W));
    }

    #[test]
    fn test_lookup_rejects_uncovered_chars() {
        assert_eq!(for_char('A'), None);
        assert_eq!(for_char('!'), None);
        assert_eq!(for_char('0'), None);
    }

    #[test]
    fn test_space_maps_to_blank() {
        assert_eq!(for_char(' '), Some(&BLANK));
        assert!(BLANK.is_blank());
    }

    #[test]
    fn test_pictures_are_symmetric() {
        // Both pictures mirror across the frame center.
        for glyph in [SMILEY, HEART] {
            let rows = glyph.rows();
            for i in 0..4 {
                assert_eq!(rows[i], rows[7 - i]);
            }
        }
    }
}
