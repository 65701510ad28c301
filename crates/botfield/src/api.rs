//! Curated surface for the viewer and batch-driver collaborators.
//!
//! Collaborators edit a configuration only through `Configuration` methods
//! (`add_bot`, `add_bots`, `add_structure`, `clear`, `edit_bot`, `move_bot`,
//! `delete_bot`, `load`, `save`) and read it through `bots`, `ids`, `bot`,
//! `angle_of`, `position_of`; scoring goes through `order_parameter`.

pub use crate::error::{Result, SwarmError};
pub use crate::geom::Point;
pub use crate::order::{order_parameter, order_parameter_with, OrderCfg};
pub use crate::shape::{Bot, BotId, BOT_AREA, LENGTH, NOSE_OFFSET};
pub use crate::swarm::{
    read_bots, write_bots, AddOutcome, BotRecord, BotSpec, Configuration, Domain, IdAllocator,
    PlacementCfg, Structure, SwarmCfg, MAX_IDS,
};

/// Score a configuration file without keeping a container around.
pub fn score_file<P: AsRef<std::path::Path>>(path: P, capacity: usize) -> Result<(usize, f64)> {
    let file = std::fs::File::open(path)?;
    let bots = read_bots(std::io::BufReader::new(file), capacity)?;
    Ok((bots.len(), order_parameter(&bots)))
}
