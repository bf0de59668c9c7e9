//! Display driver implementations
//!
//! This crate ties the board-agnostic core to a bus:
//!
//! - SSD1306 display session (init, draw, refresh)
//! - Built-in 8x8 ASCII font
//! - `embedded-hal` I2C adapter for the transport trait

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod font8x8;
pub mod ssd1306;
pub mod transport;

pub use font8x8::Font8x8Basic;
pub use ssd1306::{Error, Ssd1306};
pub use transport::I2cTransport;
