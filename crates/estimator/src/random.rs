//! Timing jitter and random deviation generators.
//!
//! Bounded uniform draws for the host, e.g. to randomize the timing of
//! outbound actions. They never touch estimator state.

use chrono::Utc;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tickfilter_core::config::RandomConfig;
use tickfilter_core::Result;
use tracing::debug;

/// Seed derived from the high-resolution wall clock.
pub fn clock_seed() -> u64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros()) as u64
}

/// Pseudo-random source seeded once and reused for every draw.
///
/// A registry builds one source and shares it across all of its engines.
#[derive(Debug)]
pub struct RandomSource {
    rng: Mutex<StdRng>,
    seed: u64,
    jitter_min_micros: i32,
    jitter_max_micros: i32,
    deviation_min: f64,
    deviation_max: f64,
}

impl RandomSource {
    /// Create from configuration, seeding from the clock when no seed is set.
    pub fn new(config: &RandomConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::seeded(config))
    }

    /// Build from a configuration whose ranges are known to be valid.
    fn seeded(config: &RandomConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        debug!(seed, injected = config.seed.is_some(), "random source seeded");

        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed,
            jitter_min_micros: config.jitter_min_micros,
            jitter_max_micros: config.jitter_max_micros,
            deviation_min: config.deviation_min,
            deviation_max: config.deviation_max,
        }
    }

    /// Create with default ranges and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::seeded(&RandomConfig {
            seed: Some(seed),
            ..RandomConfig::default()
        })
    }

    /// Uniform integer in `[jitter_min_micros, jitter_max_micros]`.
    pub fn jitter_micros(&self) -> i32 {
        self.rng
            .lock()
            .gen_range(self.jitter_min_micros..=self.jitter_max_micros)
    }

    /// Uniform float in `[deviation_min, deviation_max]`.
    pub fn random_deviation(&self) -> f64 {
        self.rng
            .lock()
            .gen_range(self.deviation_min..=self.deviation_max)
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::seeded(&RandomConfig::default())
    }
}
