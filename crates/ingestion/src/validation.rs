//! Tick validation.
//!
//! Used only when `ingestion.validate_inputs` is enabled. Timestamps are not
//! checked; out-of-order ticks are accepted either way.

use tickfilter_core::{Error, Result};

/// Reject ticks that would corrupt the momentum signal.
pub fn validate_tick(price: f64, volume: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::invalid_input(format!("price must be finite and > 0, got {price}")));
    }
    if !volume.is_finite() || volume < 0.0 {
        return Err(Error::invalid_input(format!("volume must be finite and >= 0, got {volume}")));
    }
    Ok(())
}
