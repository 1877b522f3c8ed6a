//! PyO3 bindings for the tickfilter estimator.
//!
//! Exposes the handle-based engine API to a Python host:
//! - Engine creation / destruction
//! - Tick ingestion and prediction
//! - Depth query
//! - Jitter and deviation generators

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::sync::OnceLock;

use tickfilter_core::{
    BookSide as RustBookSide,
    DepthSnapshot as RustDepthSnapshot,
    Direction as RustDirection,
    EngineHandle,
    Error as RustError,
    Prediction as RustPrediction,
};
use tickfilter_estimator::EngineRegistry;

static REGISTRY: OnceLock<EngineRegistry> = OnceLock::new();

fn registry() -> &'static EngineRegistry {
    REGISTRY.get_or_init(EngineRegistry::default)
}

fn to_py_err(err: RustError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// Predicted direction of the next move.
#[pyclass]
#[derive(Clone, Copy)]
pub enum Direction {
    Up = 1,
    Down = -1,
}

#[pymethods]
impl Direction {
    #[getter]
    fn sign(&self) -> i8 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

impl From<RustDirection> for Direction {
    fn from(d: RustDirection) -> Self {
        match d {
            RustDirection::Up => Direction::Up,
            RustDirection::Down => Direction::Down,
        }
    }
}

/// Book side suggested by the estimate.
#[pyclass]
#[derive(Clone, Copy)]
pub enum BookSide {
    Bid = 0,
    Ask = 1,
}

impl From<RustBookSide> for BookSide {
    fn from(s: RustBookSide) -> Self {
        match s {
            RustBookSide::Bid => BookSide::Bid,
            RustBookSide::Ask => BookSide::Ask,
        }
    }
}

/// Output of one prediction cycle.
#[pyclass]
#[derive(Clone)]
pub struct Prediction {
    #[pyo3(get)]
    pub strength: f64,
    #[pyo3(get)]
    pub direction: Direction,
    #[pyo3(get)]
    pub confidence: f64,
}

#[pymethods]
impl Prediction {
    fn __repr__(&self) -> String {
        format!(
            "Prediction(strength={:.6}, direction={}, confidence={:.4})",
            self.strength,
            self.direction.sign(),
            self.confidence
        )
    }
}

impl From<RustPrediction> for Prediction {
    fn from(p: RustPrediction) -> Self {
        Prediction {
            strength: p.strength,
            direction: p.direction.into(),
            confidence: p.confidence,
        }
    }
}

/// Result of a depth query.
#[pyclass]
#[derive(Clone)]
pub struct DepthSnapshot {
    #[pyo3(get)]
    pub vacuum: f64,
    #[pyo3(get)]
    pub price: f64,
    #[pyo3(get)]
    pub side: BookSide,
}

#[pymethods]
impl DepthSnapshot {
    fn __repr__(&self) -> String {
        format!(
            "DepthSnapshot(vacuum={:.2}, price={}, side={})",
            self.vacuum, self.price, self.side as u8
        )
    }
}

impl From<RustDepthSnapshot> for DepthSnapshot {
    fn from(d: RustDepthSnapshot) -> Self {
        DepthSnapshot {
            vacuum: d.vacuum,
            price: d.price,
            side: d.side.into(),
        }
    }
}

// ============================================================================
// Engine API
// ============================================================================

/// Create an engine and return its handle. Name and capacity are informational.
#[pyfunction]
fn init_engine(name: &str, capacity: i32) -> PyResult<u64> {
    registry()
        .init(name, capacity)
        .map(EngineHandle::as_u64)
        .map_err(to_py_err)
}

/// Record a tick. Returns False for an unknown handle or a rejected tick.
#[pyfunction]
fn process_tick(handle: u64, price: f64, time: i64, volume: f64) -> bool {
    registry()
        .ingest(EngineHandle(handle), price, time, volume)
        .is_ok()
}

/// Run one prediction cycle.
#[pyfunction]
fn predict_next_move(handle: u64) -> PyResult<Prediction> {
    registry()
        .predict(EngineHandle(handle))
        .map(Prediction::from)
        .map_err(to_py_err)
}

/// Depth query. The symbol is ignored.
#[pyfunction]
fn analyze_depth(handle: u64, symbol: &str) -> PyResult<DepthSnapshot> {
    registry()
        .depth_query(EngineHandle(handle), symbol)
        .map(DepthSnapshot::from)
        .map_err(to_py_err)
}

/// Random timing jitter in microseconds.
#[pyfunction]
fn jitter_micros(handle: u64) -> PyResult<i32> {
    registry()
        .jitter_micros(EngineHandle(handle))
        .map_err(to_py_err)
}

/// Random deviation factor.
#[pyfunction]
fn random_deviation(handle: u64) -> PyResult<f64> {
    registry()
        .random_deviation(EngineHandle(handle))
        .map_err(to_py_err)
}

/// Release an engine. Returns False for an unknown handle.
#[pyfunction]
fn destroy_engine(handle: u64) -> bool {
    registry().destroy(EngineHandle(handle)).is_ok()
}

// ============================================================================
// Module Definition
// ============================================================================

/// tickfilter - online momentum estimator for Python hosts.
#[pymodule]
fn tickfilter(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<Direction>()?;
    m.add_class::<BookSide>()?;
    m.add_class::<Prediction>()?;
    m.add_class::<DepthSnapshot>()?;

    // Engine API
    m.add_function(wrap_pyfunction!(init_engine, m)?)?;
    m.add_function(wrap_pyfunction!(process_tick, m)?)?;
    m.add_function(wrap_pyfunction!(predict_next_move, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_depth, m)?)?;
    m.add_function(wrap_pyfunction!(jitter_micros, m)?)?;
    m.add_function(wrap_pyfunction!(random_deviation, m)?)?;
    m.add_function(wrap_pyfunction!(destroy_engine, m)?)?;

    Ok(())
}
