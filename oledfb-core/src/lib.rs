//! Board-agnostic core logic for page-addressed monochrome displays
//!
//! This crate contains everything that does not touch a bus:
//!
//! - Display geometry (the capability bundle passed to every component)
//! - Bit-packed canvas with page/column byte layout
//! - Bitmap decoder for MSB-first ("BMP") and LSB-first ("XBM") sources
//! - Text cursor engine placing 8x8 glyphs typewriter-style
//! - Page serializer turning the canvas into page-addressed operations
//! - Display configuration and its TOML-subset parser
//!
//! # Buffer layout
//!
//! ```text
//!            column 0   column 1        column w-1
//! page 0   [ byte 0 ] [ byte 1 ] ... [ byte w-1  ]   rows 0..8
//! page 1   [ byte w ] [ ...    ] ... [ byte 2w-1 ]   rows 8..16
//! ...
//! bit b of (page p, column x) is pixel (x, p*8 + b)
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bitmap;
pub mod canvas;
pub mod config;
pub mod cursor;
pub mod error;
pub mod font;
pub mod geometry;
pub mod serializer;

pub use bitmap::{blit, BitOrder, Bitmap, BlitSummary, DecodeMode, Placement};
pub use canvas::{Canvas, TestPattern};
pub use config::{parse_config, DisplayConfig, FlushMode, ParseError};
pub use cursor::{CursorState, TextCursor, TextLength};
pub use error::DrawError;
pub use font::{FontTable, Glyph};
pub use geometry::{Geometry, GeometryError, MAX_BUFFER_LEN, PAGE_HEIGHT};
pub use serializer::{PageOp, PageSerializer};
