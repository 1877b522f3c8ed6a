//! Estimator engine.
//!
//! One engine per instrument: owns the tick state and the momentum
//! estimator, draws from a random source shared with its registry, and
//! exposes the host-facing operations.

use crate::estimator::MomentumEstimator;
use crate::random::RandomSource;
use std::sync::Arc;
use tickfilter_core::{
    BookSide, Config, DepthSnapshot, FilterSnapshot, Prediction, Result, TickTime,
};
use tickfilter_ingestion::{validate_tick, TickState};
use tracing::{debug, warn};

/// Estimator engine for a single instrument.
#[derive(Debug)]
pub struct Engine {
    /// Informational name given by the host.
    name: String,
    /// Informational capacity given by the host.
    capacity: i32,
    ticks: TickState,
    estimator: MomentumEstimator,
    /// Shared with every engine of the same registry.
    random: Arc<RandomSource>,
    validate_inputs: bool,
    vacuum_placeholder: f64,
}

impl Engine {
    /// Create a standalone engine with its own random source.
    pub fn new(name: impl Into<String>, capacity: i32, config: &Config) -> Result<Self> {
        let random = Arc::new(RandomSource::new(&config.random)?);
        Self::with_random(name, capacity, config, random)
    }

    /// Create an engine drawing jitter and deviation from `random`.
    pub fn with_random(
        name: impl Into<String>,
        capacity: i32,
        config: &Config,
        random: Arc<RandomSource>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            name: name.into(),
            capacity,
            ticks: TickState::new(),
            estimator: MomentumEstimator::new(&config.estimator),
            random,
            validate_inputs: config.ingestion.validate_inputs,
            vacuum_placeholder: config.depth.vacuum_placeholder,
        })
    }

    /// Create an engine with the default configuration.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: 0,
            ticks: TickState::new(),
            estimator: MomentumEstimator::default(),
            random: Arc::new(RandomSource::default()),
            validate_inputs: false,
            vacuum_placeholder: tickfilter_core::config::DepthConfig::default().vacuum_placeholder,
        }
    }

    /// Record a tick.
    ///
    /// Only fails when input validation is enabled and the tick is malformed;
    /// a rejected tick leaves the state untouched.
    pub fn ingest(&self, price: f64, time: TickTime, volume: f64) -> Result<()> {
        if self.validate_inputs {
            if let Err(err) = validate_tick(price, volume) {
                warn!(engine = %self.name, price, volume, time, error = %err, "tick rejected");
                return Err(err);
            }
        }
        self.ticks.ingest(price, time, volume);
        Ok(())
    }

    /// Run one prediction cycle on the current momentum.
    pub fn predict(&self) -> Prediction {
        self.estimator.predict(&self.ticks)
    }

    /// Depth query. The symbol is ignored and the vacuum is a constant.
    pub fn depth_query(&self, _symbol: &str) -> DepthSnapshot {
        let side = if self.estimator.estimate() > 0.0 {
            BookSide::Bid
        } else {
            BookSide::Ask
        };
        DepthSnapshot {
            vacuum: self.vacuum_placeholder,
            price: self.ticks.read_price(),
            side,
        }
    }

    pub fn jitter_micros(&self) -> i32 {
        self.random.jitter_micros()
    }

    pub fn random_deviation(&self) -> f64 {
        self.random.random_deviation()
    }

    /// Clear tick state and restore the filter's initial state.
    pub fn reset(&self) {
        self.ticks.reset();
        self.estimator.reset();
        debug!(engine = %self.name, "engine reset");
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn tick_state(&self) -> &TickState {
        &self.ticks
    }

    pub fn filter_snapshot(&self) -> FilterSnapshot {
        self.estimator.snapshot()
    }
}
