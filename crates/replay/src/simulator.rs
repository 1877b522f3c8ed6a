//! Replay simulator.
//!
//! Feeds recorded ticks through one engine, predicting after every tick, and
//! scores each prediction against the next accepted tick's price.

use crate::metrics::{MetricsCalculator, ReplayMetrics, ScoredPrediction};
use serde::Serialize;
use tickfilter_core::{Config, Direction, Error, FilterSnapshot, Result, Tick};
use tickfilter_estimator::Engine;
use tracing::{debug, info};

/// Outcome of a replay run.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Ticks offered to the engine.
    pub ticks: usize,
    /// Ticks rejected by input validation.
    pub rejected: usize,
    pub metrics: ReplayMetrics,
    /// Filter state after the last prediction.
    pub final_filter: FilterSnapshot,
    /// Last accepted price.
    pub final_price: f64,
    #[serde(skip)]
    pub predictions: Vec<ScoredPrediction>,
}

/// Replay simulator state.
pub struct ReplaySimulator {
    engine: Engine,
}

impl ReplaySimulator {
    /// Create a new simulator with a fresh engine.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            engine: Engine::new("replay", 0, config)?,
        })
    }

    /// Replay `ticks` in order.
    pub fn run(&self, ticks: &[Tick]) -> Result<ReplayReport> {
        let mut rejected = 0usize;
        let mut accepted: Vec<(Tick, tickfilter_core::Prediction)> = Vec::with_capacity(ticks.len());

        for tick in ticks {
            match self.engine.ingest(tick.price, tick.time, tick.volume) {
                Ok(()) => {}
                Err(Error::InvalidInput(reason)) => {
                    debug!(time = tick.time, %reason, "skipping rejected tick");
                    rejected += 1;
                    continue;
                }
                Err(err) => return Err(err),
            }
            accepted.push((*tick, self.engine.predict()));
        }

        let predictions: Vec<ScoredPrediction> = accepted
            .iter()
            .enumerate()
            .map(|(i, (tick, prediction))| ScoredPrediction {
                time: tick.time,
                prediction: *prediction,
                realized: accepted
                    .get(i + 1)
                    .and_then(|(next, _)| realized_direction(tick.price, next.price)),
            })
            .collect();

        let metrics = MetricsCalculator::calculate(&predictions);
        info!(
            ticks = ticks.len(),
            rejected,
            scored = metrics.scored,
            hit_rate = metrics.hit_rate,
            "replay finished"
        );

        Ok(ReplayReport {
            ticks: ticks.len(),
            rejected,
            metrics,
            final_filter: self.engine.filter_snapshot(),
            final_price: self.engine.tick_state().read_price(),
            predictions,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

/// Direction of a move; `None` when flat.
fn realized_direction(from: f64, to: f64) -> Option<Direction> {
    if to > from {
        Some(Direction::Up)
    } else if to < from {
        Some(Direction::Down)
    } else {
        None
    }
}
