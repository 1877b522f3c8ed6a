//! Core types and configuration for the tickfilter estimator.
//!
//! This crate provides shared types used across all other crates:
//! - Tick, prediction and depth types
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
