//! Shared tick state.
//!
//! Holds the latest price, the momentum derived from the last two ticks and
//! the last tick's timestamp. Every field is atomic on its own, but there is
//! no transaction across fields: a reader can observe the price of tick N
//! together with the momentum of tick N-1.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use tickfilter_core::TickTime;
use tracing::trace;

/// An `f64` stored as bits in an `AtomicU64`.
#[derive(Debug, Default)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.bits.load(order))
    }

    #[inline]
    pub fn store(&self, value: f64, order: Ordering) {
        self.bits.store(value.to_bits(), order);
    }

    /// Replace the value, returning the previous one in the same atomic step.
    #[inline]
    pub fn swap(&self, value: f64, order: Ordering) -> f64 {
        f64::from_bits(self.bits.swap(value.to_bits(), order))
    }
}

/// Latest-tick state written by ingestion and read by prediction.
#[derive(Debug, Default)]
#[repr(align(64))]
pub struct TickState {
    /// Most recent price. 0 means no tick seen yet.
    last_price: AtomicF64,
    /// `(price - previous_price) * volume` of the latest tick pair.
    momentum: AtomicF64,
    /// Timestamp of the most recent tick.
    last_tick_time: AtomicI64,
}

impl TickState {
    /// Create an empty tick state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear price and momentum. `last_tick_time` is kept.
    pub fn reset(&self) {
        self.last_price.store(0.0, Ordering::Release);
        self.momentum.store(0.0, Ordering::Release);
    }

    /// Record a tick and return the price it replaced.
    ///
    /// Momentum is only updated when a real previous price (> 0) existed.
    /// Inputs are not validated here.
    pub fn ingest(&self, price: f64, time: TickTime, volume: f64) -> f64 {
        let previous = self.last_price.swap(price, Ordering::AcqRel);
        if previous > 0.0 {
            let momentum = (price - previous) * volume;
            self.momentum.store(momentum, Ordering::Release);
            trace!(price, previous, volume, momentum, "tick ingested");
        } else {
            trace!(price, volume, "first tick, momentum unchanged");
        }
        self.last_tick_time.store(time, Ordering::Release);
        previous
    }

    #[inline]
    pub fn read_price(&self) -> f64 {
        self.last_price.load(Ordering::Acquire)
    }

    #[inline]
    pub fn read_momentum(&self) -> f64 {
        self.momentum.load(Ordering::Acquire)
    }

    #[inline]
    pub fn read_last_tick_time(&self) -> TickTime {
        self.last_tick_time.load(Ordering::Acquire)
    }

    /// Whether at least one tick has been recorded since the last reset.
    #[inline]
    pub fn has_price(&self) -> bool {
        self.read_price() > 0.0
    }
}
