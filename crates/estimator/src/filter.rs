//! Single-state adaptive filter.
//!
//! Recursively blends each momentum observation into a running estimate,
//! weighted by a gain recomputed every step from the process and measurement
//! noise assumptions.

use serde::{Deserialize, Serialize};
use tickfilter_core::config::EstimatorConfig;
use tickfilter_core::FilterSnapshot;

/// Recursive single-state linear filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveFilter {
    /// Process noise (q).
    process_noise: f64,
    /// Measurement noise (r).
    measurement_noise: f64,
    /// Current estimate (x).
    estimate: f64,
    /// Variance of the estimate (p). Always > 0.
    estimate_uncertainty: f64,
    /// Gain of the last update (k), in [0, 1].
    gain: f64,
    /// Values restored by `reset`.
    initial_estimate: f64,
    initial_uncertainty: f64,
}

impl AdaptiveFilter {
    /// Create a new filter.
    pub fn new(
        process_noise: f64,
        measurement_noise: f64,
        initial_estimate: f64,
        initial_uncertainty: f64,
    ) -> Self {
        Self {
            process_noise,
            measurement_noise,
            estimate: initial_estimate,
            estimate_uncertainty: initial_uncertainty,
            gain: 0.0,
            initial_estimate,
            initial_uncertainty,
        }
    }

    /// Create from estimator configuration.
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(
            config.process_noise,
            config.measurement_noise,
            config.initial_estimate,
            config.initial_uncertainty,
        )
    }

    /// Run one filter cycle against `observation` and return the new estimate.
    #[inline]
    pub fn update(&mut self, observation: f64) -> f64 {
        self.estimate_uncertainty += self.process_noise;
        self.gain = self.estimate_uncertainty / (self.estimate_uncertainty + self.measurement_noise);
        self.estimate += self.gain * (observation - self.estimate);
        self.estimate_uncertainty *= 1.0 - self.gain;
        self.estimate
    }

    #[inline]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    #[inline]
    pub fn estimate_uncertainty(&self) -> f64 {
        self.estimate_uncertainty
    }

    #[inline]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            estimate: self.estimate,
            estimate_uncertainty: self.estimate_uncertainty,
            gain: self.gain,
        }
    }

    /// Uncertainty the filter converges to under repeated updates.
    ///
    /// Solves `p = (p + q) * r / (p + q + r)` for p.
    pub fn steady_state_uncertainty(&self) -> f64 {
        let q = self.process_noise;
        let r = self.measurement_noise;
        (-q + (q * q + 4.0 * q * r).sqrt()) / 2.0
    }

    /// Restore the initial estimate and uncertainty.
    pub fn reset(&mut self) {
        self.estimate = self.initial_estimate;
        self.estimate_uncertainty = self.initial_uncertainty;
        self.gain = 0.0;
    }
}

impl Default for AdaptiveFilter {
    fn default() -> Self {
        Self::from_config(&EstimatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let filter = AdaptiveFilter::default();
        assert_eq!(filter.estimate(), 0.0);
        assert_eq!(filter.estimate_uncertainty(), 1.0);
        assert_eq!(filter.gain(), 0.0);
    }

    #[test]
    fn test_single_update() {
        let mut filter = AdaptiveFilter::default();
        let estimate = filter.update(10.0);

        // p: 1.0 -> 1.001, k = 1.001 / 1.011
        let gain = 1.001 / 1.011;
        assert_relative_eq!(filter.gain(), gain, epsilon = 1e-12);
        assert_relative_eq!(estimate, gain * 10.0, epsilon = 1e-12);
        assert_relative_eq!(filter.estimate_uncertainty(), 1.001 * (1.0 - gain), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_observation_from_zero_stays_zero() {
        let mut filter = AdaptiveFilter::default();
        for _ in 0..10 {
            assert_eq!(filter.update(0.0), 0.0);
        }
    }

    #[test]
    fn test_convergence_toward_constant_observation() {
        let mut filter = AdaptiveFilter::default();
        let target = 10.0;
        let mut prev_gap = (target - filter.estimate()).abs();

        for _ in 0..50 {
            filter.update(target);
            let gap = (target - filter.estimate()).abs();
            assert!(gap <= prev_gap);
            prev_gap = gap;
        }
        assert!(prev_gap < 1e-3);
    }

    #[test]
    fn test_uncertainty_reaches_fixed_point() {
        let mut filter = AdaptiveFilter::default();
        for _ in 0..500 {
            filter.update(1.0);
        }

        let fixed = filter.steady_state_uncertainty();
        assert_relative_eq!(filter.estimate_uncertainty(), fixed, epsilon = 1e-12);

        // One more cycle leaves it unchanged
        filter.update(1.0);
        assert_relative_eq!(filter.estimate_uncertainty(), fixed, epsilon = 1e-12);
    }

    #[test]
    fn test_gain_bounds() {
        let mut filter = AdaptiveFilter::default();
        for i in 0..100 {
            filter.update((i as f64).sin() * 100.0);
            assert!(filter.gain() > 0.0 && filter.gain() <= 1.0);
            assert!(filter.estimate_uncertainty() > 0.0);
        }
    }

    #[test]
    fn test_reset() {
        let mut filter = AdaptiveFilter::new(0.001, 0.01, 0.5, 2.0);
        filter.update(3.0);
        filter.reset();
        assert_eq!(filter.estimate(), 0.5);
        assert_eq!(filter.estimate_uncertainty(), 2.0);
        assert_eq!(filter.gain(), 0.0);
    }
}
