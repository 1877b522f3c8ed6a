//! Core data types for the tickfilter estimator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tick timestamp in caller-defined units (ms, µs, sequence number...).
pub type TickTime = i64;

/// A single observed trade event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp of the trade.
    pub time: TickTime,
    /// Trade price.
    pub price: f64,
    /// Trade volume.
    pub volume: f64,
}

impl Tick {
    pub fn new(time: TickTime, price: f64, volume: f64) -> Self {
        Self { time, price, volume }
    }
}

/// Predicted direction of the next price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Direction {
    Up = 1,
    Down = -1,
}

impl Direction {
    /// Direction implied by a filter estimate. Zero resolves to `Down`.
    #[inline]
    pub fn from_estimate(estimate: f64) -> Self {
        if estimate > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Get the sign as i8.
    #[inline]
    pub fn sign(self) -> i8 {
        self as i8
    }
}

/// Output of one prediction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Raw magnitude of the filter estimate (unclamped).
    pub strength: f64,
    /// Predicted direction.
    pub direction: Direction,
    /// Estimate magnitude mapped into [0, 1]. Not a probability.
    pub confidence: f64,
}

/// Book side suggested by the current estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum BookSide {
    Bid = 0,
    Ask = 1,
}

/// Result of a depth query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// Liquidity vacuum score. Placeholder until a real depth feed exists.
    pub vacuum: f64,
    /// Last observed price (0 if no tick yet).
    pub price: f64,
    /// `Bid` when the estimate points up, `Ask` otherwise.
    pub side: BookSide,
}

/// Point-in-time copy of the adaptive filter's internal state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub estimate: f64,
    pub estimate_uncertainty: f64,
    pub gain: f64,
}

/// Opaque identifier of an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EngineHandle(pub u64);

impl EngineHandle {
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
