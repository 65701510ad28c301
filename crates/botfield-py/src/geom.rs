//! Geometry and scoring bindings.

use crate::common::{bot_from_py, point, PyBot};
use pyo3::prelude::*;

#[pyfunction]
pub fn segments_intersect(
    p1: (f64, f64),
    p2: (f64, f64),
    q1: (f64, f64),
    q2: (f64, f64),
) -> bool {
    botfield::geom::segments_intersect(point(p1), point(p2), point(q1), point(q2))
}

#[pyfunction]
pub fn collide(a: PyBot, b: PyBot) -> bool {
    botfield::shape::collide(&bot_from_py(a), &bot_from_py(b))
}

#[pyfunction]
pub fn order_parameter(bots: Vec<PyBot>) -> f64 {
    let bots: Vec<_> = bots.into_iter().map(bot_from_py).collect();
    botfield::order::order_parameter(&bots)
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(segments_intersect, m)?)?;
    m.add_function(wrap_pyfunction!(collide, m)?)?;
    m.add_function(wrap_pyfunction!(order_parameter, m)?)?;
    Ok(())
}
