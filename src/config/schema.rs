//! Configuration schema types for `particles.toml`
//!
//! Defines the structure and validation rules for spawner configuration.
//! Every field defaults to the built-in effect, so an empty file is valid.

use serde::{Deserialize, Serialize};

use crate::models::{
    AttributeRange, ParticleRanges, CONTAINER_ID, MAX_PARTICLE_COUNT, PARTICLE_CLASS,
    PARTICLE_COUNT,
};

/// Spawner section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// Number of particles created per trigger
    #[serde(default = "default_count")]
    pub count: usize,
    /// Id of the container element
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Presentation class added to each particle
    #[serde(default = "default_class")]
    pub class: String,
    /// Seed for reproducible output; OS entropy when absent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<u64>,
}

fn default_count() -> usize {
    PARTICLE_COUNT
}

fn default_container_id() -> String {
    CONTAINER_ID.to_string()
}

fn default_class() -> String {
    PARTICLE_CLASS.to_string()
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            container_id: default_container_id(),
            class: default_class(),
            seed: None,
        }
    }
}

/// Complete particles.toml configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticlesConfig {
    /// Spawner settings
    #[serde(default)]
    pub spawner: SpawnerConfig,
    /// Attribute ranges
    #[serde(default)]
    pub ranges: ParticleRanges,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "ranges.size")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "particles.toml: '{}' {}", self.field, self.message)
    }
}

impl ParticlesConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.spawner.count == 0 {
            errors.push(ConfigValidationError {
                field: "spawner.count".to_string(),
                message: "must be a positive integer".to_string(),
            });
        } else if self.spawner.count > MAX_PARTICLE_COUNT {
            errors.push(ConfigValidationError {
                field: "spawner.count".to_string(),
                message: format!("must be at most {}", MAX_PARTICLE_COUNT),
            });
        }

        if self.spawner.container_id.trim().is_empty() {
            errors.push(ConfigValidationError {
                field: "spawner.container_id".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.spawner.class.is_empty() || self.spawner.class.chars().any(char::is_whitespace) {
            errors.push(ConfigValidationError {
                field: "spawner.class".to_string(),
                message: "must be a single non-empty class name".to_string(),
            });
        }

        let ranges = [
            ("ranges.position", self.ranges.position),
            ("ranges.duration", self.ranges.duration),
            ("ranges.delay", self.ranges.delay),
            ("ranges.size", self.ranges.size),
        ];
        for (field, range) in ranges {
            validate_range(field, range, &mut errors);
        }

        errors
    }
}

/// Ranges must be non-empty and start at or above zero: none of the
/// attributes (vw, seconds, px) accept negative values.
fn validate_range(field: &str, range: AttributeRange, errors: &mut Vec<ConfigValidationError>) {
    if !range.is_valid() {
        errors.push(ConfigValidationError {
            field: field.to_string(),
            message: format!("must be finite with min < max (got {})", range),
        });
    } else if range.min < 0.0 {
        errors.push(ConfigValidationError {
            field: field.to_string(),
            message: format!("must not be negative (got {})", range),
        });
    }
}
