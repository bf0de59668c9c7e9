//! Page serializer
//!
//! Walks the canvas page by page and yields the operations a controller in
//! page-addressing mode needs for a full-frame refresh:
//!
//! ```text
//! SelectPage(0) Data(page 0) SelectPage(1) Data(page 1) ... ResetColumns
//! ```
//!
//! The trailing column-window reset rearms controllers that latch the
//! window between frames. There is no dirty tracking; every call covers
//! the whole buffer.

use heapless::Vec;

use crate::canvas::Canvas;
use crate::geometry::MAX_BUFFER_LEN;

/// One step of a frame refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageOp<'a> {
    /// Address page `p`
    SelectPage(u8),
    /// Column bytes of the selected page, left to right
    Data(&'a [u8]),
    /// Restore the column window to `start..=end`
    ResetColumns { start: u8, end: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Select,
    Data,
    Reset,
    Done,
}

/// Iterator over the operations of one frame refresh
#[derive(Debug, Clone)]
pub struct PageSerializer<'a> {
    canvas: &'a Canvas,
    page: usize,
    stage: Stage,
}

impl<'a> PageSerializer<'a> {
    /// Start a refresh of `canvas`
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            page: 0,
            stage: Stage::Select,
        }
    }

    /// Concatenation of all data bytes, in page then column order
    pub fn data_bytes(self) -> Vec<u8, MAX_BUFFER_LEN> {
        let mut out = Vec::new();
        for op in self {
            if let PageOp::Data(bytes) = op {
                // Page data never exceeds the canvas buffer
                let _ = out.extend_from_slice(bytes);
            }
        }
        out
    }
}

impl<'a> Iterator for PageSerializer<'a> {
    type Item = PageOp<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let canvas = self.canvas;
        let geometry = canvas.geometry();
        match self.stage {
            Stage::Select => {
                self.stage = Stage::Data;
                Some(PageOp::SelectPage(self.page as u8))
            }
            Stage::Data => {
                let bytes = canvas.page(self.page)?;
                self.page += 1;
                self.stage = if self.page < geometry.pages() {
                    Stage::Select
                } else {
                    Stage::Reset
                };
                Some(PageOp::Data(bytes))
            }
            Stage::Reset => {
                self.stage = Stage::Done;
                Some(PageOp::ResetColumns {
                    start: 0,
                    end: (geometry.width() - 1) as u8,
                })
            }
            Stage::Done => None,
        }
    }
}
