//! Momentum estimation for the tickfilter system.
//!
//! This crate handles:
//! - Single-state adaptive filter over the momentum signal
//! - Direction / confidence prediction
//! - Jitter and deviation generators
//! - Engine instances and the handle registry

pub mod filter;
pub mod estimator;
pub mod random;
pub mod engine;
pub mod registry;

pub use filter::AdaptiveFilter;
pub use estimator::MomentumEstimator;
pub use random::RandomSource;
pub use engine::Engine;
pub use registry::EngineRegistry;
