//! Tick ingestion for the tickfilter estimator.
//!
//! This crate handles:
//! - Shared tick state (last price, momentum, last tick time)
//! - Momentum derivation from consecutive ticks
//! - Optional tick validation

pub mod tick_state;
pub mod validation;

pub use tick_state::{AtomicF64, TickState};
pub use validation::validate_tick;
