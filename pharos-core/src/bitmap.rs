//! 8x8 monochrome frames for the LED dot-matrix
//!
//! A [`Bitmap`] is one full display frame: eight row bytes, index 0
//! first on the wire. Bit-to-column mapping follows the matrix wiring
//! and is baked into the glyph tables, not interpreted here.

/// One 8x8 display frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap(pub [u8; 8]);

impl Bitmap {
    /// Number of rows in a frame (and of pixels per row).
    pub const SIZE: usize = 8;

    pub const fn new(rows: [u8; 8]) -> Self {
        Self(rows)
    }

    /// All rows, top to bottom.
    pub const fn rows(&self) -> [u8; 8] {
        self.0
    }

    /// A single row byte. Panics if `index >= 8`.
    pub const fn row(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// True if no pixel is lit.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&row| row == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_accessors() {
        let bm = Bitmap::new([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(bm.rows(), [1, 2, 3, 4, 5, 6, 7, 8]);
        for i in 0..Bitmap::SIZE {
            assert_eq!(bm.row(i), (i + 1) as u8);
        }
    }

    #[test]
    fn test_blank_detection() {
        assert!(Bitmap::new([0; 8]).is_blank());
        assert!(!Bitmap::new([0, 0, 0, 0x10, 0, 0, 0, 0]).is_blank());
    }
}
