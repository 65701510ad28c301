//! Collision-free placement of oriented 2D bots and their pairwise order parameter.
//!
//! Layers, leaf first:
//! - `geom`: planar kernel (rotation, polar angles, segment intersection).
//! - `shape`: bot footprint, nose point, collision predicate, broad-phase bound.
//! - `swarm`: the `Configuration` container, rejection-sampled placement,
//!   structure templates and JSON persistence.
//! - `order`: the order parameter `F` over any list of poses.
//!
//! API Policy
//! - `api` is the surface the viewer and the batch runner are meant to use.
//!   Everything else is reachable but may change with the study.

pub mod api;
pub mod error;
pub mod geom;
pub mod order;
pub mod shape;
pub mod swarm;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Result, SwarmError};
pub use geom::Point;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{distance, rotate, Point};
    pub use crate::order::{order_parameter, order_parameter_with, OrderCfg};
    pub use crate::shape::{collide, nose_point, Bot, BotId, Posed};
    pub use crate::swarm::{
        AddOutcome, BotSpec, Configuration, Domain, PlacementCfg, Structure, SwarmCfg,
    };
    pub use crate::{Result, SwarmError};
}
