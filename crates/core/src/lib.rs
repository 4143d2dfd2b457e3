//! Core utilities for the nearby-places tools
//!
//! This crate provides shared functionality used by the query service and the CLI:
//!
//! - **Error handling**: Coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with environment overrides and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use tourism_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("default radius: {} km", config.schema.nearby.default_radius_km);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
