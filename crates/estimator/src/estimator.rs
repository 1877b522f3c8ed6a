//! Momentum estimator.
//!
//! Turns the momentum signal of a [`TickState`] into a direction and
//! confidence by running one adaptive filter cycle per prediction.

use crate::filter::AdaptiveFilter;
use parking_lot::Mutex;
use tickfilter_core::config::EstimatorConfig;
use tickfilter_core::{Direction, FilterSnapshot, Prediction};
use tickfilter_ingestion::TickState;
use tracing::trace;

/// Map an estimate to a confidence in [0, 1].
#[inline]
pub fn confidence_for(estimate: f64, scale: f64) -> f64 {
    (estimate.abs() * scale).min(1.0)
}

/// Adaptive filter guarded for concurrent predictions.
///
/// Every `predict` call advances the filter, even when no tick arrived since
/// the previous call. Concurrent callers are serialized on the filter lock.
#[derive(Debug)]
pub struct MomentumEstimator {
    filter: Mutex<AdaptiveFilter>,
    confidence_scale: f64,
}

impl MomentumEstimator {
    /// Create a new estimator.
    pub fn new(config: &EstimatorConfig) -> Self {
        Self {
            filter: Mutex::new(AdaptiveFilter::from_config(config)),
            confidence_scale: config.confidence_scale,
        }
    }

    /// Read the current momentum and run one filter cycle on it.
    pub fn predict(&self, ticks: &TickState) -> Prediction {
        let momentum = ticks.read_momentum();
        self.predict_with(momentum)
    }

    /// Run one filter cycle on an explicit momentum observation.
    pub fn predict_with(&self, momentum: f64) -> Prediction {
        let estimate = self.filter.lock().update(momentum);

        let prediction = Prediction {
            strength: estimate.abs(),
            direction: Direction::from_estimate(estimate),
            confidence: confidence_for(estimate, self.confidence_scale),
        };
        trace!(
            momentum,
            estimate,
            confidence = prediction.confidence,
            "prediction updated"
        );
        prediction
    }

    /// Current estimate without advancing the filter.
    pub fn estimate(&self) -> f64 {
        self.filter.lock().estimate()
    }

    /// Copy of the filter state.
    pub fn snapshot(&self) -> FilterSnapshot {
        self.filter.lock().snapshot()
    }

    /// Restore the filter's initial state.
    pub fn reset(&self) {
        self.filter.lock().reset();
    }

    pub fn confidence_scale(&self) -> f64 {
        self.confidence_scale
    }
}

impl Default for MomentumEstimator {
    fn default() -> Self {
        Self::new(&EstimatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_cold_state() {
        let estimator = MomentumEstimator::default();
        let ticks = TickState::new();

        let prediction = estimator.predict(&ticks);
        assert_eq!(prediction.direction, Direction::Down);
        assert_eq!(prediction.confidence, 0.0);
        assert_eq!(prediction.strength, 0.0);
    }

    #[test]
    fn test_single_tick_matches_cold_state() {
        let cold = MomentumEstimator::default().predict(&TickState::new());

        let ticks = TickState::new();
        ticks.ingest(100.0, 0, 1.0);
        let warm = MomentumEstimator::default().predict(&ticks);

        assert_eq!(cold, warm);
    }

    #[test]
    fn test_positive_momentum_predicts_up() {
        let estimator = MomentumEstimator::default();
        let ticks = TickState::new();
        ticks.ingest(100.0, 0, 1.0);
        ticks.ingest(101.0, 1, 10.0);

        let prediction = estimator.predict(&ticks);
        assert!(estimator.estimate() > 0.0);
        assert_eq!(prediction.direction, Direction::Up);
    }

    #[test]
    fn test_negative_momentum_predicts_down() {
        let estimator = MomentumEstimator::default();
        let ticks = TickState::new();
        ticks.ingest(100.0, 0, 1.0);
        ticks.ingest(99.0, 1, 2.0);

        let prediction = estimator.predict(&ticks);
        assert!(estimator.estimate() < 0.0);
        assert_eq!(prediction.direction, Direction::Down);
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_reference_scenario() {
        let estimator = MomentumEstimator::default();
        let ticks = TickState::new();
        ticks.ingest(50.0, 1000, 2.0);
        ticks.ingest(52.0, 1001, 5.0);

        let prediction = estimator.predict(&ticks);
        let snapshot = estimator.snapshot();

        let gain = 1.001 / 1.011;
        assert_relative_eq!(snapshot.gain, gain, epsilon = 1e-12);
        assert_relative_eq!(snapshot.estimate, gain * 10.0, epsilon = 1e-12);
        assert_relative_eq!(prediction.strength, snapshot.estimate.abs());
        assert_relative_eq!(prediction.strength, 9.901, epsilon = 1e-3);
        assert_eq!(prediction.direction, Direction::Up);
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_predict_mutates_with_stale_momentum() {
        let estimator = MomentumEstimator::default();
        let ticks = TickState::new();
        ticks.ingest(100.0, 0, 1.0);
        ticks.ingest(101.0, 1, 10.0);

        let mut prev = estimator.snapshot();
        for _ in 0..20 {
            estimator.predict(&ticks);
            let next = estimator.snapshot();
            assert_ne!(next.estimate_uncertainty, prev.estimate_uncertainty);
            // Moves toward the unchanged momentum without overshooting
            assert!((10.0 - next.estimate).abs() < (10.0 - prev.estimate).abs());
            assert!(next.estimate <= 10.0);
            prev = next;
        }
    }

    #[test]
    fn test_convergence_fixed_point() {
        let estimator = MomentumEstimator::default();
        let ticks = TickState::new();
        for i in 0..50 {
            // Constant +1 price step at volume 2 -> momentum 2
            ticks.ingest(100.0 + i as f64, i, 2.0);
        }
        for _ in 0..500 {
            estimator.predict(&ticks);
        }

        let snapshot = estimator.snapshot();
        let fixed = AdaptiveFilter::default().steady_state_uncertainty();
        assert_relative_eq!(snapshot.estimate, 2.0, epsilon = 1e-9);
        assert_relative_eq!(snapshot.estimate_uncertainty, fixed, epsilon = 1e-12);
    }

    #[test]
    fn test_small_estimate_confidence_is_linear() {
        let estimator = MomentumEstimator::default();
        let prediction = estimator.predict_with(0.001);
        let estimate = estimator.estimate();

        assert!(estimate.abs() < 0.01);
        assert_relative_eq!(prediction.confidence, estimate.abs() * 100.0);
        assert_relative_eq!(prediction.strength, estimate.abs());
    }

    #[test]
    fn test_reset() {
        let estimator = MomentumEstimator::default();
        estimator.predict_with(5.0);
        estimator.reset();
        assert_eq!(estimator.snapshot(), AdaptiveFilter::default().snapshot());
    }

    #[test]
    fn test_concurrent_predictions_stay_finite() {
        let estimator = Arc::new(MomentumEstimator::default());
        let ticks = Arc::new(TickState::new());
        ticks.ingest(100.0, 0, 1.0);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let estimator = Arc::clone(&estimator);
                let ticks = Arc::clone(&ticks);
                thread::spawn(move || {
                    for i in 0..1000 {
                        if t == 0 {
                            ticks.ingest(100.0 + (i % 7) as f64, i, 1.5);
                        }
                        let prediction = estimator.predict(&ticks);
                        assert!(prediction.confidence >= 0.0 && prediction.confidence <= 1.0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = estimator.snapshot();
        assert!(snapshot.estimate.is_finite());
        assert!(snapshot.estimate_uncertainty > 0.0);
        assert!(snapshot.gain >= 0.0 && snapshot.gain <= 1.0);
    }

    proptest! {
        #[test]
        fn prop_confidence_clamp(estimate in -1.0e6f64..1.0e6) {
            let confidence = confidence_for(estimate, 100.0);
            if estimate.abs() >= 0.01 {
                prop_assert_eq!(confidence, 1.0);
            } else {
                prop_assert_eq!(confidence, estimate.abs() * 100.0);
            }
        }

        #[test]
        fn prop_strength_matches_estimate(momentum in -1.0e4f64..1.0e4) {
            let estimator = MomentumEstimator::default();
            let prediction = estimator.predict_with(momentum);
            let estimate = estimator.estimate();
            prop_assert_eq!(prediction.strength, estimate.abs());
            prop_assert_eq!(prediction.direction, Direction::from_estimate(estimate));
            prop_assert!(prediction.confidence <= 1.0);
        }
    }
}
