//! oledfb Hardware Abstraction Layer
//!
//! This crate defines the transport seam between the display driver and
//! whatever bus actually moves bytes to the panel. Chip-specific code (or
//! the `embedded-hal` adapter in `oledfb-drivers`) implements [`Transport`];
//! everything above it stays board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  oledfb-drivers (Ssd1306 session)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  oledfb-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embedded-hal │       │  test mocks   │
//! │   I2C buses   │       │               │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{Timeout, Transaction, Transport};
