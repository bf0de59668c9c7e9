//! Text cursor engine
//!
//! A typewriter head over the canvas: two signed coordinates, advanced one
//! glyph cell per character, with an explicit newline and no word wrap.
//!
//! # States
//!
//! ```text
//!             draw_char                    draw_char
//!   ┌───────┐ ───────────► ┌────────────┐ ◄─────────┐
//!   │ Empty │  place (0,0) │ Positioned │ advance,  │
//!   └───────┘ ◄─────────── └────────────┘ then place┘
//!               clear/reset
//! ```
//!
//! The advance happens *before* a glyph is placed, so after the first
//! character every glyph lands one cell past the previous cursor position.
//! When the column reaches the canvas width one glyph is placed at
//! `x == width` (entirely clipped) before the cursor wraps to the next row.

use crate::bitmap::{blit, Bitmap, BlitSummary, Placement};
use crate::canvas::Canvas;
use crate::error::DrawError;
use crate::font::{FontTable, GLYPH_SIZE};
use crate::geometry::Geometry;

/// Sentinel coordinate meaning "nothing drawn yet"
pub const EMPTY: i32 = -(GLYPH_SIZE as i32);

const CELL: i32 = GLYPH_SIZE as i32;

/// Cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorState {
    /// No glyph placed on this line yet
    Empty,
    /// Column holds the position of the last placed glyph
    Positioned,
}

/// How much of a byte string to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextLength {
    /// Exactly this many bytes
    Explicit(usize),
    /// Up to and including the first NUL byte (drawn as a blank cell), or
    /// the whole slice if there is none
    NulTerminated,
}

impl TextLength {
    fn resolve(self, text: &[u8]) -> Result<usize, DrawError> {
        match self {
            TextLength::Explicit(len) if len > text.len() => Err(DrawError::LengthExceedsText {
                len,
                available: text.len(),
            }),
            TextLength::Explicit(len) => Ok(len),
            TextLength::NulTerminated => Ok(text
                .iter()
                .position(|&b| b == 0)
                .map_or(text.len(), |nul| nul + 1)),
        }
    }
}

/// Glyph placement position in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCursor {
    column: i32,
    row: i32,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCursor {
    /// A cursor in the empty state
    pub const fn new() -> Self {
        Self {
            column: EMPTY,
            row: EMPTY,
        }
    }

    /// Back to the empty state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Column of the last placed glyph (or [`EMPTY`])
    pub fn column(&self) -> i32 {
        self.column
    }

    /// Row of the last placed glyph (or [`EMPTY`])
    pub fn row(&self) -> i32 {
        self.row
    }

    /// `(column, row)`
    pub fn position(&self) -> (i32, i32) {
        (self.column, self.row)
    }

    /// Current state
    pub fn state(&self) -> CursorState {
        if self.column == EMPTY {
            CursorState::Empty
        } else {
            CursorState::Positioned
        }
    }

    /// Move to the cell for the next glyph and return it
    ///
    /// From a fully cleared cursor the first cell is `(0, 0)`. Otherwise the
    /// column advances one cell, or wraps to 0 on the next row once it has
    /// reached the width; a row equal to the height wraps to 0. A column
    /// sentinel left by [`newline`](Self::newline) advances onto column 0.
    pub fn advance(&mut self, geometry: &Geometry) -> (i32, i32) {
        let width = geometry.width() as i32;
        let height = geometry.height() as i32;

        if self.column < 0 && self.row < 0 {
            self.column = 0;
            self.row = 0;
        } else {
            if self.column == width {
                self.column = 0;
                self.row += CELL;
            } else {
                self.column += CELL;
            }
            if self.row == height {
                self.row = 0;
            }
        }

        (self.column, self.row)
    }

    /// Move down one row and return to the start of the line
    ///
    /// The row wraps to 0 only when it equals the height exactly, so from
    /// the last row it first steps to `height`.
    pub fn newline(&mut self, geometry: &Geometry) {
        let height = geometry.height() as i32;
        self.row = if self.row == height { 0 } else { self.row + CELL };
        self.column = EMPTY;
    }

    /// Position the cursor so a string of `len` glyphs starts near the middle
    ///
    /// Stays on the current row while the cursor is in the left half,
    /// otherwise moves down one row (wrapping before the last row). An
    /// empty cursor lands on row 0 instead of keeping the `-8` sentinel.
    pub fn center_for(&mut self, geometry: &Geometry, len: usize) {
        let half_width = geometry.width() / 2;
        let height = geometry.height() as i32;
        let origin = half_width.saturating_sub(len / 2) as i32;

        if self.column < half_width as i32 {
            if self.row < 0 {
                self.row = 0;
            }
        } else {
            self.row = if self.row < height - CELL {
                self.row + CELL
            } else {
                0
            };
        }
        self.column = origin;
    }

    /// Draw one character at the next cell
    ///
    /// The glyph is looked up before the cursor moves; a missing glyph
    /// leaves the cursor where it was.
    pub fn draw_char<F>(
        &mut self,
        canvas: &mut Canvas,
        font: &F,
        code: u8,
    ) -> Result<BlitSummary, DrawError>
    where
        F: FontTable + ?Sized,
    {
        let glyph = font.glyph(code).ok_or(DrawError::MissingGlyph(code))?;
        let geometry = *canvas.geometry();
        let bitmap = Bitmap::new(&geometry, glyph, GLYPH_SIZE, GLYPH_SIZE, font.mode())?;

        let (x, y) = self.advance(&geometry);
        Ok(blit(canvas, &bitmap, Placement::at(x, y)))
    }

    /// Draw a byte string, optionally centered
    pub fn draw_string<F>(
        &mut self,
        canvas: &mut Canvas,
        font: &F,
        text: &[u8],
        len: TextLength,
        center: bool,
    ) -> Result<BlitSummary, DrawError>
    where
        F: FontTable + ?Sized,
    {
        let len = len.resolve(text)?;
        if center {
            let geometry = *canvas.geometry();
            self.center_for(&geometry, len);
        }

        let mut summary = BlitSummary::default();
        for &code in &text[..len] {
            summary.merge(self.draw_char(canvas, font, code)?);
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Glyph;

    const G: Geometry = Geometry::SSD1306_128X64;

    /// Every glyph is a solid block except NUL
    struct BlockFont([Glyph; 128]);

    impl BlockFont {
        fn new() -> Self {
            let mut glyphs = [[0xFF; 8]; 128];
            glyphs[0] = [0; 8];
            Self(glyphs)
        }
    }

    impl FontTable for BlockFont {
        fn glyph(&self, code: u8) -> Option<&Glyph> {
            self.0.get(code as usize)
        }
    }

    #[test]
    fn test_first_char_from_empty() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        assert_eq!(cursor.state(), CursorState::Empty);

        cursor.draw_char(&mut canvas, &BlockFont::new(), b'A').unwrap();
        assert_eq!(cursor.position(), (0, 0));
        assert_eq!(cursor.state(), CursorState::Positioned);
        assert_eq!(canvas.pixel(0, 0), Some(true));
        assert_eq!(canvas.pixel(7, 7), Some(true));
        assert_eq!(canvas.pixel(8, 0), Some(false));
    }

    #[test]
    fn test_second_char_advances_first() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        let font = BlockFont::new();

        cursor.draw_char(&mut canvas, &font, b'A').unwrap();
        cursor.draw_char(&mut canvas, &font, b'B').unwrap();
        assert_eq!(cursor.position(), (8, 0));
        assert_eq!(canvas.pixel(8, 0), Some(true));
        assert_eq!(canvas.pixel(15, 7), Some(true));
    }

    #[test]
    fn test_column_wraps_after_reaching_width() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        let font = BlockFont::new();

        for _ in 0..16 {
            cursor.draw_char(&mut canvas, &font, b'x').unwrap();
        }
        assert_eq!(cursor.position(), (120, 0));

        // 17th glyph lands at x == width and is clipped entirely
        let summary = cursor.draw_char(&mut canvas, &font, b'x').unwrap();
        assert_eq!(cursor.position(), (128, 0));
        assert_eq!(summary.drawn, 0);
        assert_eq!(summary.clipped, 64);

        cursor.draw_char(&mut canvas, &font, b'x').unwrap();
        assert_eq!(cursor.position(), (0, 8));
        assert_eq!(canvas.pixel(0, 8), Some(true));
    }

    #[test]
    fn test_row_wraps_at_height() {
        let mut cursor = TextCursor { column: 128, row: 56 };
        cursor.advance(&G);
        // row 64 == height wraps straight back to the top
        assert_eq!(cursor.position(), (0, 0));
    }

    #[test]
    fn test_newline_boundary() {
        let mut cursor = TextCursor { column: 40, row: 56 };
        cursor.newline(&G);
        assert_eq!(cursor.position(), (EMPTY, 64));
        cursor.newline(&G);
        assert_eq!(cursor.position(), (EMPTY, 0));
    }

    #[test]
    fn test_newline_then_char_starts_at_column_zero() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        let font = BlockFont::new();

        cursor.draw_char(&mut canvas, &font, b'a').unwrap();
        cursor.draw_char(&mut canvas, &font, b'b').unwrap();
        cursor.newline(&G);
        assert_eq!(cursor.state(), CursorState::Empty);

        cursor.draw_char(&mut canvas, &font, b'c').unwrap();
        assert_eq!(cursor.position(), (0, 8));
        assert_eq!(canvas.pixel(0, 8), Some(true));
    }

    #[test]
    fn test_newline_from_cleared_state() {
        let mut cursor = TextCursor::new();
        cursor.newline(&G);
        assert_eq!(cursor.position(), (EMPTY, 0));
        cursor.advance(&G);
        assert_eq!(cursor.position(), (0, 0));
    }

    #[test]
    fn test_center_from_empty() {
        let mut cursor = TextCursor::new();
        cursor.center_for(&G, 10);
        assert_eq!(cursor.column(), 59);
        assert_eq!(cursor.row(), 0);
    }

    #[test]
    fn test_center_from_right_half_moves_down() {
        let mut cursor = TextCursor { column: 80, row: 16 };
        cursor.center_for(&G, 4);
        assert_eq!(cursor.position(), (62, 24));

        let mut cursor = TextCursor { column: 80, row: 56 };
        cursor.center_for(&G, 4);
        assert_eq!(cursor.position(), (62, 0));
    }

    #[test]
    fn test_center_long_string_clamps_origin() {
        let mut cursor = TextCursor::new();
        cursor.center_for(&G, 200);
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_draw_string_centered() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        let font = BlockFont::new();

        cursor
            .draw_string(&mut canvas, &font, b"hi", TextLength::Explicit(2), true)
            .unwrap();
        // origin 63, first glyph after one advance
        assert_eq!(cursor.position(), (79, 0));
        assert_eq!(canvas.pixel(71, 0), Some(true));
        assert_eq!(canvas.pixel(70, 0), Some(false));
    }

    #[test]
    fn test_draw_string_nul_terminated() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        let font = BlockFont::new();

        let summary = cursor
            .draw_string(&mut canvas, &font, b"abc\0def", TextLength::NulTerminated, false)
            .unwrap();
        // The terminator takes a blank cell of its own
        assert_eq!(cursor.position(), (24, 0));
        assert_eq!(summary.drawn, 3 * 64);
        assert_eq!(canvas.pixel(24, 0), Some(false));
    }

    #[test]
    fn test_draw_string_nul_terminated_centering() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        let font = BlockFont::new();

        cursor
            .draw_string(&mut canvas, &font, b"abc\0", TextLength::NulTerminated, true)
            .unwrap();
        // Four cells including the NUL: origin 64 - 2 = 62
        assert_eq!(cursor.position(), (62 + 4 * 8, 0));
        assert_eq!(canvas.pixel(70, 0), Some(true));
        assert_eq!(canvas.pixel(69, 0), Some(false));
    }

    #[test]
    fn test_draw_string_without_nul_uses_whole_slice() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        cursor
            .draw_string(&mut canvas, &BlockFont::new(), b"ab", TextLength::NulTerminated, false)
            .unwrap();
        assert_eq!(cursor.position(), (8, 0));
    }

    #[test]
    fn test_draw_string_length_checked() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        let result = cursor.draw_string(
            &mut canvas,
            &BlockFont::new(),
            b"ab",
            TextLength::Explicit(3),
            false,
        );
        assert_eq!(
            result,
            Err(DrawError::LengthExceedsText {
                len: 3,
                available: 2
            })
        );
        assert_eq!(cursor.state(), CursorState::Empty);
    }

    #[test]
    fn test_missing_glyph_leaves_cursor() {
        let mut canvas = Canvas::new(G);
        let mut cursor = TextCursor::new();
        let result = cursor.draw_char(&mut canvas, &BlockFont::new(), 200);
        assert_eq!(result, Err(DrawError::MissingGlyph(200)));
        assert_eq!(cursor.state(), CursorState::Empty);
    }

    #[test]
    fn test_reset() {
        let mut cursor = TextCursor { column: 24, row: 8 };
        cursor.reset();
        assert_eq!(cursor.position(), (EMPTY, EMPTY));
    }
}
