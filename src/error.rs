//! Error types for particle spawning

use thiserror::Error;

/// Error when spawning particles into a host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// The designated container element is not in the document
    #[error("Container element '#{id}' not found in document")]
    MissingContainer { id: String },
    /// The spawner settings failed validation
    #[error("Invalid particle settings: {0}")]
    InvalidConfig(String),
    /// The particle field was already spawned on this page
    #[error("Particles were already spawned on this page")]
    AlreadySpawned,
    /// The host document rejected a DOM operation
    #[error("DOM operation '{operation}' failed: {message}")]
    Dom { operation: &'static str, message: String },
}

impl SpawnError {
    pub fn missing_container(id: impl Into<String>) -> Self {
        Self::MissingContainer { id: id.into() }
    }

    pub fn dom(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Dom { operation, message: message.into() }
    }
}
