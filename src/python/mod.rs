//! Python bindings for the tile-merge engine.
//!
//! # Quick Start
//!
//! ```python
//! import tile_merge
//!
//! session = tile_merge.Session(size=4, seed=42)
//! gained = session.move_tiles("left")
//! board = session.grid()  # numpy uint32, shape (4, 4)
//! ```

use pyo3::prelude::*;

mod py_session;

pub use py_session::*;

/// tile_merge: a 2048-style move engine.
#[pymodule]
fn tile_merge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySession>()?;
    Ok(())
}
