//! PyO3 bindings for selected `botfield` functions.
//!
//! Notes
//! - Keep bindings thin: bots cross the boundary as `(id, angle_deg, (x, y))`
//!   tuples; anything richer is built on the Python side.
//! - Placement exhaustion raises `RuntimeError`, file errors `OSError`, bad
//!   ids and records `ValueError`.

use pyo3::prelude::*;

mod common;
mod geom;
mod swarm;

#[pymodule]
fn botfield_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", botfield::VERSION)?;
    geom::register(m)?;
    swarm::register(m)?;
    Ok(())
}
