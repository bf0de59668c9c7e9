//! Font table seam
//!
//! Glyph data is supplied from outside the core. A table maps character
//! codes to fixed 8x8 packed glyphs and says which bit convention they use.

use crate::bitmap::DecodeMode;

/// Glyph width and height in pixels
pub const GLYPH_SIZE: usize = 8;

/// One 8x8 glyph, one byte per row
pub type Glyph = [u8; GLYPH_SIZE];

/// Read-only mapping from character code to glyph
pub trait FontTable {
    /// Glyph for `code`, `None` if the table has no entry
    fn glyph(&self, code: u8) -> Option<&Glyph>;

    /// Bit convention of the stored glyphs
    ///
    /// Defaults to LSB-first rows where set bits draw.
    fn mode(&self) -> DecodeMode {
        DecodeMode::Xbm { invert: false }
    }
}

impl<F: FontTable + ?Sized> FontTable for &F {
    fn glyph(&self, code: u8) -> Option<&Glyph> {
        (**self).glyph(code)
    }

    fn mode(&self) -> DecodeMode {
        (**self).mode()
    }
}

/// A plain slice of glyphs indexed by character code
impl FontTable for [Glyph] {
    fn glyph(&self, code: u8) -> Option<&Glyph> {
        self.get(code as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_table() {
        let table: [Glyph; 2] = [[0; 8], [0xFF; 8]];
        let font: &[Glyph] = &table;
        assert_eq!(font.glyph(1), Some(&[0xFF; 8]));
        assert_eq!(font.glyph(2), None);
        assert_eq!(font.mode(), DecodeMode::Xbm { invert: false });
    }
}
