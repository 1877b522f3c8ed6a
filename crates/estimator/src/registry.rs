//! Engine registry.
//!
//! Table of engines keyed by opaque handles. This is the host-facing call
//! surface: every operation takes a handle and fails with
//! [`Error::UnknownHandle`] once the engine is destroyed.

use crate::engine::Engine;
use crate::random::RandomSource;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tickfilter_core::{Config, DepthSnapshot, EngineHandle, Error, Prediction, Result, TickTime};
use tracing::{info, warn};

/// Thread-safe table of engine instances.
#[derive(Debug)]
pub struct EngineRegistry {
    engines: RwLock<HashMap<EngineHandle, Arc<Engine>>>,
    next_handle: AtomicU64,
    config: Config,
    /// Jitter / deviation source shared by every engine in the table.
    random: Arc<RandomSource>,
}

impl EngineRegistry {
    /// Create a registry whose engines share `config` and one random source.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let random = Arc::new(RandomSource::new(&config.random)?);
        Ok(Self {
            engines: RwLock::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
            config,
            random,
        })
    }

    /// Create and register a fresh engine.
    pub fn init(&self, name: &str, capacity: i32) -> Result<EngineHandle> {
        let engine = Engine::with_random(name, capacity, &self.config, Arc::clone(&self.random))?;
        let handle = EngineHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.engines.write().insert(handle, Arc::new(engine));
        info!(%handle, name, capacity, "engine created");
        Ok(handle)
    }

    /// Look up an engine. The registry lock is released before returning.
    pub fn get(&self, handle: EngineHandle) -> Result<Arc<Engine>> {
        match self.engines.read().get(&handle) {
            Some(engine) => Ok(Arc::clone(engine)),
            None => {
                warn!(%handle, "unknown engine handle");
                Err(Error::UnknownHandle(handle.as_u64()))
            }
        }
    }

    pub fn ingest(&self, handle: EngineHandle, price: f64, time: TickTime, volume: f64) -> Result<()> {
        self.get(handle)?.ingest(price, time, volume)
    }

    pub fn predict(&self, handle: EngineHandle) -> Result<Prediction> {
        Ok(self.get(handle)?.predict())
    }

    pub fn depth_query(&self, handle: EngineHandle, symbol: &str) -> Result<DepthSnapshot> {
        Ok(self.get(handle)?.depth_query(symbol))
    }

    pub fn jitter_micros(&self, handle: EngineHandle) -> Result<i32> {
        Ok(self.get(handle)?.jitter_micros())
    }

    pub fn random_deviation(&self, handle: EngineHandle) -> Result<f64> {
        Ok(self.get(handle)?.random_deviation())
    }

    /// Remove an engine. Callers still holding its `Arc` keep a usable engine.
    pub fn destroy(&self, handle: EngineHandle) -> Result<()> {
        match self.engines.write().remove(&handle) {
            Some(engine) => {
                info!(%handle, name = engine.name(), "engine destroyed");
                Ok(())
            }
            None => {
                warn!(%handle, "destroy on unknown engine handle");
                Err(Error::UnknownHandle(handle.as_u64()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.engines.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.read().is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self {
            engines: RwLock::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
            config: Config::default(),
            random: Arc::new(RandomSource::default()),
        }
    }
}
