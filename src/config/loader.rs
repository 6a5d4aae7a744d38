//! Configuration loading and discovery for `particles.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::ParticlesConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = "particles.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse particles.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override particle count
    pub count: Option<usize>,
    /// Override container id
    pub container_id: Option<String>,
    /// Override presentation class
    pub class: Option<String>,
    /// Override random seed
    pub seed: Option<u64>,
}

/// Find particles.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for particles.toml
/// 2. Check XDG_CONFIG_HOME/particlefield/particles.toml (or ~/.config/particlefield/particles.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find particles.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("particlefield").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find particles.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a particles.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration (250 particles into `#particles`).
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("site/particles.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<ParticlesConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
            Ok(ParticlesConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<ParticlesConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    let config: ParticlesConfig = toml::from_str(&contents)?;
    check(&config)?;
    Ok(config)
}

/// Turn validation failures into a [`ConfigError::Validation`].
pub fn check(config: &ParticlesConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged
/// config should be re-checked with [`check`].
pub fn merge_cli_overrides(config: &mut ParticlesConfig, overrides: &CliOverrides) {
    if let Some(count) = overrides.count {
        config.spawner.count = count;
    }

    if let Some(ref id) = overrides.container_id {
        config.spawner.container_id = id.clone();
    }

    if let Some(ref class) = overrides.class {
        config.spawner.class = class.clone();
    }

    if let Some(seed) = overrides.seed {
        config.spawner.seed = Some(seed);
    }
}
