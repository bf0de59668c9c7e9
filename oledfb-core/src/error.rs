//! Drawing errors
//!
//! Geometry problems that the panel itself would silently swallow are
//! reported here instead of corrupting neighbouring pages.

/// Errors raised by drawing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawError {
    /// Pixel coordinate outside the canvas
    OutOfBounds { x: i32, y: i32 },
    /// Page index past the last page
    PageOutOfRange(usize),
    /// Source bytes shorter than the bitmap dimensions require
    SourceTooShort { needed: usize, available: usize },
    /// Font table has no glyph for this character code
    MissingGlyph(u8),
    /// Explicit text length longer than the text itself
    LengthExceedsText { len: usize, available: usize },
}
