//! Replay metrics.
//!
//! Scores each prediction against the price move that followed it.

use serde::Serialize;
use tickfilter_core::{Direction, Prediction, TickTime};

/// A prediction paired with the move that followed it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPrediction {
    /// Time of the tick the prediction was made after.
    pub time: TickTime,
    pub prediction: Prediction,
    /// Direction of the next move, `None` for a flat move or the last tick.
    pub realized: Option<Direction>,
}

impl ScoredPrediction {
    /// Whether the predicted direction matched. `None` when unscored.
    pub fn is_hit(&self) -> Option<bool> {
        self.realized.map(|realized| realized == self.prediction.direction)
    }
}

/// Aggregate replay metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayMetrics {
    /// Number of predictions made.
    pub predictions: usize,
    /// Predictions followed by a non-flat move.
    pub scored: usize,
    /// Scored predictions whose direction matched.
    pub hits: usize,
    /// hits / scored (0 when nothing was scored).
    pub hit_rate: f64,
    /// Mean confidence over all predictions.
    pub mean_confidence: f64,
    /// Hit rate restricted to predictions with confidence == 1.
    pub full_confidence_hit_rate: f64,
    pub up_predictions: usize,
    pub down_predictions: usize,
}

/// Metrics calculator.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Calculate metrics from scored predictions.
    pub fn calculate(scored: &[ScoredPrediction]) -> ReplayMetrics {
        if scored.is_empty() {
            return ReplayMetrics::default();
        }

        let mut metrics = ReplayMetrics::default();
        metrics.predictions = scored.len();

        let mut confidence_sum = 0.0;
        let mut full_scored = 0usize;
        let mut full_hits = 0usize;

        for entry in scored {
            confidence_sum += entry.prediction.confidence;

            match entry.prediction.direction {
                Direction::Up => metrics.up_predictions += 1,
                Direction::Down => metrics.down_predictions += 1,
            }

            if let Some(hit) = entry.is_hit() {
                metrics.scored += 1;
                if hit {
                    metrics.hits += 1;
                }
                if entry.prediction.confidence >= 1.0 {
                    full_scored += 1;
                    if hit {
                        full_hits += 1;
                    }
                }
            }
        }

        metrics.mean_confidence = confidence_sum / metrics.predictions as f64;
        metrics.hit_rate = ratio(metrics.hits, metrics.scored);
        metrics.full_confidence_hit_rate = ratio(full_hits, full_scored);
        metrics
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 {
        num as f64 / den as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scored(direction: Direction, confidence: f64, realized: Option<Direction>) -> ScoredPrediction {
        ScoredPrediction {
            time: 0,
            prediction: Prediction {
                strength: confidence / 100.0,
                direction,
                confidence,
            },
            realized,
        }
    }

    #[test]
    fn test_empty() {
        let metrics = MetricsCalculator::calculate(&[]);
        assert_eq!(metrics.predictions, 0);
        assert_eq!(metrics.hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let entries = vec![
            scored(Direction::Up, 1.0, Some(Direction::Up)),
            scored(Direction::Up, 0.5, Some(Direction::Down)),
            scored(Direction::Down, 1.0, Some(Direction::Down)),
            scored(Direction::Down, 0.0, None),
        ];
        let metrics = MetricsCalculator::calculate(&entries);

        assert_eq!(metrics.predictions, 4);
        assert_eq!(metrics.scored, 3);
        assert_eq!(metrics.hits, 2);
        assert_relative_eq!(metrics.hit_rate, 2.0 / 3.0);
        assert_relative_eq!(metrics.mean_confidence, 0.625);
        assert_relative_eq!(metrics.full_confidence_hit_rate, 1.0);
        assert_eq!(metrics.up_predictions, 2);
        assert_eq!(metrics.down_predictions, 2);
    }

    #[test]
    fn test_unscored_entry() {
        let entry = scored(Direction::Up, 1.0, None);
        assert_eq!(entry.is_hit(), None);
    }
}
