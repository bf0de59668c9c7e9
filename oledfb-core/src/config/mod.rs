//! Display configuration
//!
//! Board-agnostic settings for one panel. Stored as postcard binary data
//! when the `serde` feature is on, or parsed from a small TOML subset.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
