//! Offline replay for the tickfilter estimator.
//!
//! This crate provides:
//! - Tick-by-tick replay through an engine
//! - Directional hit-rate scoring against the next price move

pub mod simulator;
pub mod metrics;

pub use simulator::{ReplayReport, ReplaySimulator};
pub use metrics::{MetricsCalculator, ReplayMetrics, ScoredPrediction};
