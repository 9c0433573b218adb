//! Parsing and validation of `cmodel.toml` simulation settings.
//!
//! Every section of the file is optional; missing values fall back to the
//! defaults documented on each type in [`types`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
