//! # GeoText Common Library
//!
//! Shared code for GeoText crates:
//! - Error type and result alias
//! - Service configuration loading (CLI → ENV → TOML → defaults)

pub mod config;
pub mod error;

pub use config::{ServiceConfig, TomlConfig};
pub use error::{Error, Result};
