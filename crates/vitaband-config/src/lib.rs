// Copyright 2026 VitaBand Project
// SPDX-License-Identifier: Apache-2.0

//! # VitaBand Configuration System
//!
//! Type-safe configuration loader for the monitor:
//! - TOML file parsing (`vitaband_configuration.toml`)
//! - Environment variable overrides (`VITABAND_*`)
//! - Validation pass before the config reaches the rest of the system
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vitaband_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("poll interval: {}s", config.monitor.poll_interval_secs);
//! ```

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::validate_config;

use thiserror::Error;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised while locating, parsing or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(String),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
