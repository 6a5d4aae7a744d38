//! Configuration module for the particle spawner
//!
//! Provides types and loading for `particles.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    check, find_config, find_config_from, load_config, merge_cli_overrides, CliOverrides,
    ConfigError, CONFIG_FILE_NAME,
};
pub use schema::*;
