//! Particlefield - ambient decorative particles for web pages
//!
//! On a single trigger, fills a container element with randomized
//! particles that an external stylesheet animates. This library provides:
//! - The particle model and its attribute ranges
//! - A host [`document::Document`] abstraction with an in-memory implementation
//! - The one-shot [`spawner::ParticleSpawner`]
//! - A browser entry point (feature `wasm`) and the `particles` CLI

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod spawner;

#[cfg(feature = "wasm")]
pub mod wasm;
