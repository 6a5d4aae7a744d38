//! Particle spawner.
//!
//! Creates the whole particle field in one synchronous burst:
//!
//! 1. Build a [`ParticleSpawner`] from a [`ParticlesConfig`] (or use the default)
//! 2. Call [`ParticleSpawner::spawn`] once with the host [`Document`]
//! 3. The returned [`SpawnReport`] lists the particles in DOM order
//!
//! `spawn` consumes the spawner, so one spawner fires at most once. Hosts
//! with more than one entry point share a [`SpawnGate`] so the page as a
//! whole gets a single field.
//!
//! # Example
//!
//! ```
//! use particlefield::document::{Document, VirtualDocument};
//! use particlefield::spawner::ParticleSpawner;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut doc = VirtualDocument::with_container("particles");
//! let report = ParticleSpawner::default()
//!     .spawn(&mut doc, &mut StdRng::seed_from_u64(42))
//!     .unwrap();
//!
//! let container = doc.get_element_by_id("particles").unwrap();
//! assert_eq!(report.particles.len(), 250);
//! assert_eq!(doc.children(container).len(), 250);
//! ```

use std::cell::Cell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{check, ConfigError, ParticlesConfig, SpawnerConfig};
use crate::document::Document;
use crate::error::SpawnError;
use crate::models::{Particle, ParticleRanges, PARTICLE_TAG};

/// Outcome of a successful burst
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnReport {
    /// Id of the container the particles were appended to
    pub container_id: String,
    /// Generated particles in creation (and DOM) order
    pub particles: Vec<Particle>,
}

/// One-shot particle spawner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticleSpawner {
    settings: SpawnerConfig,
    ranges: ParticleRanges,
}

impl ParticleSpawner {
    /// Create a spawner from a configuration.
    ///
    /// The configuration is validated first, so a spawner never holds an
    /// empty range or an out-of-bounds count.
    pub fn new(config: &ParticlesConfig) -> Result<Self, ConfigError> {
        check(config)?;
        Ok(Self { settings: config.spawner.clone(), ranges: config.ranges })
    }

    pub fn count(&self) -> usize {
        self.settings.count
    }

    pub fn container_id(&self) -> &str {
        &self.settings.container_id
    }

    pub fn ranges(&self) -> &ParticleRanges {
        &self.ranges
    }

    /// Spawn the particle field into `doc` using `rng` for every attribute.
    ///
    /// The container is looked up before anything is created: if it is
    /// missing, this returns [`SpawnError::MissingContainer`] and the
    /// document is left untouched. A DOM failure part-way through aborts
    /// the rest of the burst.
    pub fn spawn<D, R>(self, doc: &mut D, rng: &mut R) -> Result<SpawnReport, SpawnError>
    where
        D: Document,
        R: Rng + ?Sized,
    {
        let container_id = self.settings.container_id;
        let Some(container) = doc.get_element_by_id(&container_id) else {
            tracing::warn!(container = %container_id, "particle container not found");
            return Err(SpawnError::MissingContainer { id: container_id });
        };

        tracing::debug!(count = self.settings.count, container = %container_id, "spawning particles");

        let mut particles = Vec::with_capacity(self.settings.count);
        for _ in 0..self.settings.count {
            let particle = Particle::random(&self.ranges, rng);

            let element = doc.create_element(PARTICLE_TAG)?;
            doc.add_class(&element, &self.settings.class)?;
            for (property, value) in particle.style_declarations() {
                doc.set_style(&element, property, &value)?;
            }
            doc.append_child(&container, &element)?;

            particles.push(particle);
        }

        tracing::info!(count = particles.len(), container = %container_id, "particles spawned");
        Ok(SpawnReport { container_id, particles })
    }

    /// Spawn with the configured seed, or OS entropy when no seed is set.
    pub fn spawn_with_entropy<D: Document>(self, doc: &mut D) -> Result<SpawnReport, SpawnError> {
        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.spawn(doc, &mut rng)
    }
}

/// Page-wide once-flag shared by every trigger of a host.
///
/// A gate is consumed by the first successful burst. A failed attempt
/// (e.g. the container is not on the page yet) leaves it open.
#[derive(Debug, Default)]
pub struct SpawnGate {
    fired: Cell<bool>,
}

impl SpawnGate {
    pub const fn new() -> Self {
        Self { fired: Cell::new(false) }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    /// Run `burst` unless a previous burst through this gate succeeded.
    pub fn run<F>(&self, burst: F) -> Result<SpawnReport, SpawnError>
    where
        F: FnOnce() -> Result<SpawnReport, SpawnError>,
    {
        if self.fired.get() {
            tracing::debug!("particle field already spawned, ignoring trigger");
            return Err(SpawnError::AlreadySpawned);
        }
        let report = burst()?;
        self.fired.set(true);
        Ok(report)
    }
}
