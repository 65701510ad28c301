use nalgebra::Vector2;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::PyErr;

use botfield::shape::Bot;
use botfield::SwarmError;

/// Python-side bot: `(id, angle_deg, (x, y))`.
pub type PyBot = (u32, f64, (f64, f64));

#[inline]
pub fn point(p: (f64, f64)) -> Vector2<f64> {
    Vector2::new(p.0, p.1)
}

pub fn bot_from_py(bot: PyBot) -> Bot {
    let (id, angle, position) = bot;
    Bot::new(id, angle, point(position))
}

pub fn bot_to_py(bot: &Bot) -> PyBot {
    (bot.id, bot.angle, (bot.position.x, bot.position.y))
}

pub fn map_swarm_err(err: SwarmError) -> PyErr {
    match err {
        SwarmError::PlacementExhausted { .. } => PyRuntimeError::new_err(err.to_string()),
        SwarmError::Io(_) => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}
