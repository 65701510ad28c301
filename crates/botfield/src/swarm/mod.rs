//! Configuration container: an ordered bot collection with identifier management.
//!
//! Purpose
//! - Own one configuration (ordered `Vec<Bot>` plus an `IdAllocator`) and the
//!   random source used to grow it collision-free.
//! - Offer the editing surface the viewer and the batch driver use: add,
//!   bulk add, structure add, edit, move, delete, clear, load, save.
//!
//! Invariants
//! - Identifiers are unique and lie in `[0, capacity)`; the allocator marks
//!   exactly the identifiers present in `bots`.
//! - Every stored angle and coordinate is finite, so saved files load back.
//! - Randomized placement never inserts a bot that collides with one already
//!   present. Explicit adds and edits do not check collisions.
//! - Insertion order is kept (and persisted) but carries no meaning.
//!
//! Duplicate explicit ids on add are ignored: nothing is inserted, the call
//! returns `AddOutcome::DuplicateIgnored` and logs a warning.
//!
//! Code cross-refs: `placement` (rejection loops), `store` (JSON records),
//! `transform::{rotate_around, shift}`, `shape::collide`.

mod ids;
mod placement;
mod store;
mod structure;
mod transform;

pub use ids::{IdAllocator, MAX_IDS};
pub use placement::{Domain, PlacementCfg};
pub use store::{read_bots, write_bots, BotRecord};
pub use structure::{BotSpec, Structure};
pub use transform::{rotate_around, shift};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::error::{Result, SwarmError};
use crate::geom::{sum, Point};
use crate::shape::{Bot, BotId, Posed};

/// Container settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwarmCfg {
    /// Size of the identifier pool.
    pub capacity: usize,
    /// Seed for the placement RNG; `None` draws one from system entropy.
    pub seed: Option<u64>,
    pub placement: PlacementCfg,
}

impl Default for SwarmCfg {
    fn default() -> Self {
        Self {
            capacity: MAX_IDS,
            seed: None,
            placement: PlacementCfg::default(),
        }
    }
}

impl SwarmCfg {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Result of a single add.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted(BotId),
    /// The explicit id was already taken; nothing changed.
    DuplicateIgnored(BotId),
}

impl AddOutcome {
    #[inline]
    pub fn inserted(self) -> Option<BotId> {
        match self {
            Self::Inserted(id) => Some(id),
            Self::DuplicateIgnored(_) => None,
        }
    }

    #[inline]
    pub fn id(self) -> BotId {
        match self {
            Self::Inserted(id) | Self::DuplicateIgnored(id) => id,
        }
    }
}

/// An ordered, identifier-managed collection of bots.
#[derive(Clone, Debug)]
pub struct Configuration {
    bots: Vec<Bot>,
    ids: IdAllocator,
    rng: StdRng,
    placement: PlacementCfg,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(SwarmCfg::default())
    }
}

impl Configuration {
    pub fn new(cfg: SwarmCfg) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(cfg, rng)
    }

    /// Use a caller-provided generator; `cfg.seed` is ignored.
    pub fn with_rng(cfg: SwarmCfg, rng: StdRng) -> Self {
        Self {
            bots: Vec::new(),
            ids: IdAllocator::new(cfg.capacity),
            rng,
            placement: cfg.placement,
        }
    }

    #[inline]
    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// Identifier usage set.
    #[inline]
    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    #[inline]
    pub fn placement_cfg(&self) -> PlacementCfg {
        self.placement
    }

    pub fn set_placement_cfg(&mut self, placement: PlacementCfg) {
        self.placement = placement;
    }

    pub fn bot(&self, id: BotId) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == id)
    }

    pub fn angle_of(&self, id: BotId) -> Option<f64> {
        self.bot(id).map(|b| b.angle)
    }

    pub fn position_of(&self, id: BotId) -> Option<Point> {
        self.bot(id).map(|b| b.position)
    }

    fn bot_mut(&mut self, id: BotId) -> Option<&mut Bot> {
        self.bots.iter_mut().find(|b| b.id == id)
    }

    fn ensure_free(&self, needed: usize) -> Result<()> {
        if self.ids.free_count() < needed {
            return Err(SwarmError::CapacityExhausted {
                capacity: self.ids.capacity(),
            });
        }
        Ok(())
    }

    /// Append one bot. `None` takes the lowest free id.
    pub fn add_bot(&mut self, id: Option<BotId>, angle: f64, position: Point) -> Result<AddOutcome> {
        SwarmError::check_pose(angle, position)?;
        let id = match id {
            Some(id) => {
                let id = self.ids.check(i64::from(id))?;
                if self.ids.is_used(id) {
                    warn!(id, "bot id already in use, add ignored");
                    return Ok(AddOutcome::DuplicateIgnored(id));
                }
                id
            }
            None => self.ids.next_free()?,
        };
        self.ids.insert(id)?;
        self.bots.push(Bot::new(id, angle, position));
        Ok(AddOutcome::Inserted(id))
    }

    /// Add records in order; stops at the first error, keeping earlier inserts.
    pub fn add_bots(&mut self, specs: &[BotSpec]) -> Result<Vec<AddOutcome>> {
        specs
            .iter()
            .map(|spec| match *spec {
                BotSpec::Explicit {
                    id,
                    angle,
                    position,
                } => self.add_bot(Some(id), angle, position),
                BotSpec::Auto { angle, position } => self.add_bot(None, angle, position),
            })
            .collect()
    }

    /// Rotate `structure` about its origin, move it to `position`, and add every
    /// member under a fresh id. All-or-nothing with respect to id capacity
    /// and pose validity.
    pub fn add_structure(
        &mut self,
        structure: &Structure,
        position: Point,
        angle_deg: f64,
    ) -> Result<Vec<BotId>> {
        self.ensure_free(structure.len())?;
        let placed = shift(
            &rotate_around(structure.members(), Point::zeros(), angle_deg),
            position,
        );
        for member in &placed {
            SwarmError::check_pose(member.angle(), member.position())?;
        }
        let specs: Vec<BotSpec> = placed.into_iter().map(BotSpec::into_auto).collect();
        let outcomes = self.add_bots(&specs)?;
        Ok(outcomes.into_iter().filter_map(AddOutcome::inserted).collect())
    }

    pub fn clear(&mut self) {
        self.bots.clear();
        self.ids.clear();
    }

    /// Remove the bot with `id`, freeing the id.
    pub fn delete_bot(&mut self, id: BotId) -> Option<Bot> {
        let idx = self.bots.iter().position(|b| b.id == id)?;
        self.ids.remove(id);
        Some(self.bots.remove(idx))
    }

    /// Overwrite orientation and/or position. Returns whether anything changed.
    pub fn edit_bot(
        &mut self,
        id: BotId,
        angle: Option<f64>,
        position: Option<Point>,
    ) -> Result<bool> {
        if angle.is_none() && position.is_none() {
            return Ok(false);
        }
        let Some(bot) = self.bot_mut(id) else {
            return Ok(false);
        };
        let angle = angle.unwrap_or(bot.angle);
        let position = position.unwrap_or(bot.position);
        SwarmError::check_pose(angle, position)?;
        bot.angle = angle;
        bot.position = position;
        Ok(true)
    }

    /// Add `delta_angle` / `delta_position` to the bot's pose.
    pub fn move_bot(
        &mut self,
        id: BotId,
        delta_angle: Option<f64>,
        delta_position: Option<Point>,
    ) -> Result<bool> {
        if delta_angle.is_none() && delta_position.is_none() {
            return Ok(false);
        }
        let Some(bot) = self.bot_mut(id) else {
            return Ok(false);
        };
        let angle = bot.angle + delta_angle.unwrap_or(0.0);
        let position = sum(bot.position, delta_position.unwrap_or_else(Point::zeros), 1.0);
        SwarmError::check_pose(angle, position)?;
        bot.angle = angle;
        bot.position = position;
        Ok(true)
    }
}
