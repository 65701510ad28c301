//! Random configuration and file bindings.

use crate::common::{bot_to_py, map_swarm_err, point, PyBot};
use botfield::swarm::{read_bots, Configuration, Domain, PlacementCfg, SwarmCfg, MAX_IDS};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn fill(
    count: usize,
    domain: Domain,
    seed: Option<u64>,
    max_attempts: Option<u64>,
) -> PyResult<Vec<PyBot>> {
    let cfg = SwarmCfg {
        capacity: MAX_IDS,
        seed,
        placement: PlacementCfg { max_attempts },
    };
    let mut swarm = Configuration::new(cfg);
    swarm
        .fill(domain, count, (0.0, 360.0))
        .map_err(map_swarm_err)?;
    Ok(swarm.bots().iter().map(bot_to_py).collect())
}

/// `count` bots in the origin-centred square of side `extent`.
#[pyfunction]
#[pyo3(signature = (count, extent, seed=None, max_attempts=None))]
pub fn generate_square(
    count: usize,
    extent: f64,
    seed: Option<u64>,
    max_attempts: Option<u64>,
) -> PyResult<Vec<PyBot>> {
    let h = extent / 2.0;
    fill(count, Domain::Rect { x: (-h, h), y: (-h, h) }, seed, max_attempts)
}

/// `count` bots in the disk of radius `extent`.
#[pyfunction]
#[pyo3(signature = (count, extent, seed=None, max_attempts=None))]
pub fn generate_disk(
    count: usize,
    extent: f64,
    seed: Option<u64>,
    max_attempts: Option<u64>,
) -> PyResult<Vec<PyBot>> {
    fill(count, Domain::Disk { radius: extent }, seed, max_attempts)
}

#[pyfunction]
pub fn load_configuration(path: &str) -> PyResult<Vec<PyBot>> {
    let file = std::fs::File::open(path).map_err(|e| map_swarm_err(e.into()))?;
    let bots = read_bots(std::io::BufReader::new(file), MAX_IDS).map_err(map_swarm_err)?;
    Ok(bots.iter().map(bot_to_py).collect())
}

#[pyfunction]
pub fn save_configuration(path: &str, bots: Vec<PyBot>) -> PyResult<()> {
    let mut swarm = Configuration::default();
    for (id, angle, position) in bots {
        let outcome = swarm
            .add_bot(Some(id), angle, point(position))
            .map_err(map_swarm_err)?;
        if outcome.inserted().is_none() {
            return Err(PyValueError::new_err(format!("duplicate bot id {id}")));
        }
    }
    swarm.save(path).map_err(map_swarm_err)
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_square, m)?)?;
    m.add_function(wrap_pyfunction!(generate_disk, m)?)?;
    m.add_function(wrap_pyfunction!(load_configuration, m)?)?;
    m.add_function(wrap_pyfunction!(save_configuration, m)?)?;
    Ok(())
}
