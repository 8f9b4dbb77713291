//! Session bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Direction, SessionConfig};
use crate::error::ParseDirectionError;
use crate::session::{GameSession, MoveStatus};
use crate::store::{BestScoreStore, JsonFileStore, MemoryStore};

type DynStore = Box<dyn BestScoreStore + Send>;

/// Python wrapper for GameSession.
///
/// Settles every move immediately; there is no animation to pace.
#[pyclass(name = "Session")]
pub struct PySession {
    inner: GameSession<DynStore>,
}

#[pymethods]
impl PySession {
    /// Create a session.
    ///
    /// # Arguments
    /// - size: Board side length (2-16)
    /// - four_probability: Chance a spawned tile is a 4
    /// - seed: RNG seed; random if omitted
    /// - best_score_path: JSON file for the best score; in-memory if omitted
    #[new]
    #[pyo3(signature = (size = 4, four_probability = 0.2, seed = None, best_score_path = None))]
    fn new(
        size: usize,
        four_probability: f64,
        seed: Option<u64>,
        best_score_path: Option<String>,
    ) -> PyResult<Self> {
        let mut config = SessionConfig::new()
            .with_size(size)
            .with_four_probability(four_probability)
            .with_settle_delay(std::time::Duration::ZERO);
        config.seed = seed;

        let store: DynStore = match best_score_path {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };

        let inner = GameSession::new(config, store)
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Start a new game.
    fn start(&mut self) {
        self.inner.start();
    }

    /// Move in a direction ("up", "down", "left", "right").
    ///
    /// Returns the points gained, or None if nothing moved or the game is over.
    fn move_tiles(&mut self, direction: &str) -> PyResult<Option<u64>> {
        let direction: Direction = direction.parse().map_err(|e: ParseDirectionError| {
            PyErr::new::<PyValueError, _>(e.to_string())
        })?;

        Ok(match self.inner.move_tiles(direction) {
            MoveStatus::Moved { score_delta } => Some(score_delta),
            MoveStatus::Blocked | MoveStatus::Ignored => None,
        })
    }

    /// Finish a move that is still settling.
    ///
    /// Returns the number of merges resolved, or None if nothing was pending.
    fn settle(&mut self) -> Option<usize> {
        self.inner.settle().map(|report| report.merges)
    }

    #[getter]
    fn score(&self) -> u64 {
        self.inner.score()
    }

    #[getter]
    fn best_score(&self) -> u64 {
        self.inner.best_score()
    }

    #[getter]
    fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Board values as a 2-D uint32 array; 0 marks an empty cell.
    fn grid<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let grid = self.inner.grid();
        let n = grid.size();
        let flat: Vec<u32> = grid.values().into_iter().flatten().collect();

        PyArray1::from_vec_bound(py, flat)
            .reshape([n, n])
            .map_err(|e| PyErr::new::<PyValueError, _>(format!("{}", e)))
    }

    fn __repr__(&self) -> String {
        format!(
            "Session(size={}, score={}, active={})",
            self.inner.grid().size(),
            self.inner.score(),
            self.inner.is_active()
        )
    }
}
