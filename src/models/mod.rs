//! Data models for particles

mod particle;

pub use particle::{
    AttributeRange, Particle, ParticleRanges, CONTAINER_ID, DELAY_RANGE, DURATION_RANGE,
    MAX_PARTICLE_COUNT, PARTICLE_CLASS, PARTICLE_COUNT, PARTICLE_TAG, POSITION_RANGE, SIZE_RANGE,
};
