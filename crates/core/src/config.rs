//! Configuration structures for the tickfilter estimator.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for an estimator engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Adaptive filter configuration.
    pub estimator: EstimatorConfig,
    /// Tick ingestion configuration.
    pub ingestion: IngestionConfig,
    /// Jitter / deviation generator configuration.
    pub random: RandomConfig,
    /// Depth query configuration.
    pub depth: DepthConfig,
}

impl Config {
    /// Parse a configuration from JSON. Missing sections fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check that all parameters are usable.
    pub fn validate(&self) -> Result<()> {
        self.estimator.validate()?;
        self.random.validate()?;
        if !self.depth.vacuum_placeholder.is_finite() {
            return Err(Error::config("depth.vacuum_placeholder must be finite"));
        }
        Ok(())
    }
}

/// Adaptive filter parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Expected drift of the underlying signal between updates (q).
    pub process_noise: f64,
    /// Noise of each momentum observation (r).
    pub measurement_noise: f64,
    /// Starting estimate.
    pub initial_estimate: f64,
    /// Starting estimate variance.
    pub initial_uncertainty: f64,
    /// Multiplier mapping |estimate| to confidence before clamping to 1.
    pub confidence_scale: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            process_noise: 0.001,
            measurement_noise: 0.01,
            initial_estimate: 0.0,
            initial_uncertainty: 1.0,
            confidence_scale: 100.0,
        }
    }
}

impl EstimatorConfig {
    fn validate(&self) -> Result<()> {
        if !(self.process_noise.is_finite() && self.process_noise >= 0.0) {
            return Err(Error::config("estimator.process_noise must be finite and >= 0"));
        }
        if !(self.measurement_noise.is_finite() && self.measurement_noise > 0.0) {
            return Err(Error::config("estimator.measurement_noise must be finite and > 0"));
        }
        if !(self.initial_uncertainty.is_finite() && self.initial_uncertainty > 0.0) {
            return Err(Error::config("estimator.initial_uncertainty must be finite and > 0"));
        }
        if !self.initial_estimate.is_finite() {
            return Err(Error::config("estimator.initial_estimate must be finite"));
        }
        if !(self.confidence_scale.is_finite() && self.confidence_scale > 0.0) {
            return Err(Error::config("estimator.confidence_scale must be finite and > 0"));
        }
        Ok(())
    }
}

/// Tick ingestion configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Reject non-finite / non-positive prices and negative volumes.
    /// Off by default: malformed ticks flow into the momentum signal.
    pub validate_inputs: bool,
}

/// Jitter and deviation generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Inclusive lower bound of jitter (µs).
    pub jitter_min_micros: i32,
    /// Inclusive upper bound of jitter (µs).
    pub jitter_max_micros: i32,
    /// Lower bound of random deviation.
    pub deviation_min: f64,
    /// Upper bound of random deviation.
    pub deviation_max: f64,
    /// Fixed seed. `None` seeds from the wall clock when the source is created.
    pub seed: Option<u64>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            jitter_min_micros: 15,
            jitter_max_micros: 245,
            deviation_min: 0.1,
            deviation_max: 1.5,
            seed: None,
        }
    }
}

impl RandomConfig {
    /// Check that both ranges are non-empty and finite.
    pub fn validate(&self) -> Result<()> {
        if self.jitter_min_micros > self.jitter_max_micros {
            return Err(Error::config(format!(
                "random.jitter_min_micros ({}) exceeds jitter_max_micros ({})",
                self.jitter_min_micros, self.jitter_max_micros
            )));
        }
        if !(self.deviation_min.is_finite() && self.deviation_max.is_finite()) {
            return Err(Error::config("random deviation bounds must be finite"));
        }
        if self.deviation_min > self.deviation_max {
            return Err(Error::config(format!(
                "random.deviation_min ({}) exceeds deviation_max ({})",
                self.deviation_min, self.deviation_max
            )));
        }
        Ok(())
    }
}

/// Depth query configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    /// Constant vacuum score reported by depth queries.
    pub vacuum_placeholder: f64,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            vacuum_placeholder: 0.85,
        }
    }
}
