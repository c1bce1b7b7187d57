//! Cargo report configuration: TOML loading, validation and fingerprints.

pub mod error;
pub mod hash;
pub mod loader;
pub mod summary;

pub use crate::error::{ConfigError, Result};
pub use crate::loader::{
    LoadedConfig, fingerprint, load_config, parse_config, render_config, validate_config,
};
pub use crate::summary::ConfigSummary;
