//! Particle attribute types.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of particles spawned per page load
pub const PARTICLE_COUNT: usize = 250;

/// Upper bound accepted for a configured particle count
pub const MAX_PARTICLE_COUNT: usize = 10_000;

/// Id of the host element that receives the particles
pub const CONTAINER_ID: &str = "particles";

/// Presentation class the stylesheet animates
pub const PARTICLE_CLASS: &str = "particle";

/// Element tag used for each particle
pub const PARTICLE_TAG: &str = "div";

/// Horizontal position in viewport-width units
pub const POSITION_RANGE: AttributeRange = AttributeRange::new(0.0, 100.0);

/// Animation duration in seconds
pub const DURATION_RANGE: AttributeRange = AttributeRange::new(5.0, 10.0);

/// Animation start delay in seconds
pub const DELAY_RANGE: AttributeRange = AttributeRange::new(0.0, 5.0);

/// Width and height in pixels
pub const SIZE_RANGE: AttributeRange = AttributeRange::new(2.0, 6.0);

/// A half-open `[min, max)` range a particle attribute is drawn from.
///
/// Serialized as a two-element array so config files can write
/// `size = [2.0, 6.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct AttributeRange {
    pub min: f64,
    pub max: f64,
}

impl AttributeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw a uniform sample in `[min, max)`.
    ///
    /// Invalid ranges (empty or non-finite) yield `min`; config validation
    /// rejects them before they reach a spawner.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if !self.is_valid() {
            return self.min;
        }
        rng.random_range(self.min..self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    /// Whether both bounds are finite and `min < max`
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

impl From<[f64; 2]> for AttributeRange {
    fn from(bounds: [f64; 2]) -> Self {
        Self::new(bounds[0], bounds[1])
    }
}

impl From<AttributeRange> for [f64; 2] {
    fn from(range: AttributeRange) -> Self {
        [range.min, range.max]
    }
}

impl std::fmt::Display for AttributeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}

fn default_position() -> AttributeRange {
    POSITION_RANGE
}

fn default_duration() -> AttributeRange {
    DURATION_RANGE
}

fn default_delay() -> AttributeRange {
    DELAY_RANGE
}

fn default_size() -> AttributeRange {
    SIZE_RANGE
}

/// The four ranges particle attributes are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRanges {
    /// Horizontal position (vw)
    #[serde(default = "default_position")]
    pub position: AttributeRange,
    /// Animation duration (s)
    #[serde(default = "default_duration")]
    pub duration: AttributeRange,
    /// Animation delay (s)
    #[serde(default = "default_delay")]
    pub delay: AttributeRange,
    /// Width and height (px)
    #[serde(default = "default_size")]
    pub size: AttributeRange,
}

impl Default for ParticleRanges {
    fn default() -> Self {
        Self {
            position: POSITION_RANGE,
            duration: DURATION_RANGE,
            delay: DELAY_RANGE,
            size: SIZE_RANGE,
        }
    }
}

/// A single decorative particle.
///
/// Holds the randomized presentation attributes; the animation itself is
/// defined by an external stylesheet targeting [`PARTICLE_CLASS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Horizontal position in viewport-width units
    pub left_vw: f64,
    /// Animation duration in seconds
    pub duration_s: f64,
    /// Animation start delay in seconds
    pub delay_s: f64,
    /// Edge length in pixels, applied to both width and height
    pub size_px: f64,
}

impl Particle {
    /// Draw a particle with every attribute sampled uniformly from `ranges`.
    pub fn random<R: Rng + ?Sized>(ranges: &ParticleRanges, rng: &mut R) -> Self {
        Self {
            left_vw: ranges.position.sample(rng),
            duration_s: ranges.duration.sample(rng),
            delay_s: ranges.delay.sample(rng),
            size_px: ranges.size.sample(rng),
        }
    }

    /// Inline style declarations as `(property, value)` pairs, in the order
    /// they are applied to the element.
    pub fn style_declarations(&self) -> [(&'static str, String); 5] {
        let size = format!("{}px", self.size_px);
        [
            ("left", format!("{}vw", self.left_vw)),
            ("animation-duration", format!("{}s", self.duration_s)),
            ("animation-delay", format!("{}s", self.delay_s)),
            ("width", size.clone()),
            ("height", size),
        ]
    }

    /// The declarations joined into a `style` attribute value
    pub fn inline_style(&self) -> String {
        self.style_declarations()
            .iter()
            .map(|(property, value)| format!("{}: {};", property, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether every attribute lies inside its range
    pub fn is_within(&self, ranges: &ParticleRanges) -> bool {
        ranges.position.contains(self.left_vw)
            && ranges.duration.contains(self.duration_s)
            && ranges.delay.contains(self.delay_s)
            && ranges.size.contains(self.size_px)
    }
}
