//! Randomized collision-free placement (rejection sampling).
//!
//! Model
//! - Each attempt draws an origin from the domain and an orientation from the
//!   angle bounds, builds the candidate (one bot, or a whole rigid structure
//!   rotated about its local origin and shifted), and keeps it only if no
//!   member collides with any existing bot inside the broad-phase cutoff.
//! - Draw order per attempt: rectangle `x, y, angle`; disk `r, θ, angle`.
//! - Disk draws use a linear radius (`r = R·U`), which concentrates bots near
//!   the centre.
//! - Without `PlacementCfg::max_attempts` the loop never gives up.

use rand::Rng;
use tracing::{debug, warn};

use super::structure::Structure;
use super::transform::{rotate_around, shift};
use super::Configuration;
use crate::error::{Result, SwarmError};
use crate::geom::Point;
use crate::shape::{collides_with_any, Bot, BotId, Posed, BOT_AREA};

/// Rejection-loop limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementCfg {
    /// `None` keeps drawing until a free spot is found.
    pub max_attempts: Option<u64>,
}

/// Region origins are drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Domain {
    /// Axis-aligned box `[x.0, x.1) × [y.0, y.1)`.
    Rect { x: (f64, f64), y: (f64, f64) },
    /// Disk of `radius` around the origin.
    Disk { radius: f64 },
}

impl Domain {
    /// Origin-centred square whose area is `bots · BOT_AREA / density`.
    pub fn square_for_density(bots: usize, density: f64) -> Self {
        let side = (bots as f64 * BOT_AREA / density).sqrt();
        Self::Rect {
            x: (-side / 2.0, side / 2.0),
            y: (-side / 2.0, side / 2.0),
        }
    }

    /// Origin-centred disk whose area is `bots · BOT_AREA / density`.
    pub fn disk_for_density(bots: usize, density: f64) -> Self {
        let area = bots as f64 * BOT_AREA / density;
        Self::Disk {
            radius: (area / std::f64::consts::PI).sqrt(),
        }
    }

    pub fn area(&self) -> f64 {
        match *self {
            Self::Rect { x, y } => (x.1 - x.0).abs() * (y.1 - y.0).abs(),
            Self::Disk { radius } => std::f64::consts::PI * radius * radius,
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Point {
        match *self {
            Self::Rect { x, y } => {
                let px = x.0 + (x.1 - x.0) * rng.gen::<f64>();
                let py = y.0 + (y.1 - y.0) * rng.gen::<f64>();
                Point::new(px, py)
            }
            Self::Disk { radius } => {
                let r = radius * rng.gen::<f64>();
                let theta = (360.0 * rng.gen::<f64>()).to_radians();
                Point::new(r * theta.cos(), r * theta.sin())
            }
        }
    }
}

#[inline]
fn sample_angle<R: Rng>(bounds: (f64, f64), rng: &mut R) -> f64 {
    bounds.0 + (bounds.1 - bounds.0) * rng.gen::<f64>()
}

impl Configuration {
    /// Place one bot uniformly in `bounds_x × bounds_y` without overlap.
    pub fn add_bot_randomized(
        &mut self,
        bounds_x: (f64, f64),
        bounds_y: (f64, f64),
        bounds_angle: (f64, f64),
    ) -> Result<BotId> {
        self.place_bot(
            Domain::Rect {
                x: bounds_x,
                y: bounds_y,
            },
            bounds_angle,
        )
    }

    /// Place one bot in the disk of `radius` around the origin without overlap.
    pub fn add_bot_randomized_circle(
        &mut self,
        radius: f64,
        bounds_angle: (f64, f64),
    ) -> Result<BotId> {
        self.place_bot(Domain::Disk { radius }, bounds_angle)
    }

    /// Place a whole structure with its origin in `bounds_x × bounds_y`.
    pub fn add_structure_randomized(
        &mut self,
        structure: &Structure,
        bounds_x: (f64, f64),
        bounds_y: (f64, f64),
        bounds_angle: (f64, f64),
    ) -> Result<Vec<BotId>> {
        self.place_structure(
            structure,
            Domain::Rect {
                x: bounds_x,
                y: bounds_y,
            },
            bounds_angle,
        )
    }

    /// Place a whole structure with its origin in the disk of `radius`.
    pub fn add_structure_randomized_circle(
        &mut self,
        structure: &Structure,
        radius: f64,
        bounds_angle: (f64, f64),
    ) -> Result<Vec<BotId>> {
        self.place_structure(structure, Domain::Disk { radius }, bounds_angle)
    }

    /// Single-bot placement in an arbitrary domain.
    pub fn place_bot(&mut self, domain: Domain, bounds_angle: (f64, f64)) -> Result<BotId> {
        let id = self.ids.next_free()?;
        let mut placed = self.draw_until_free(domain, bounds_angle, |origin, angle| {
            vec![Bot::new(id, angle, origin)]
        })?;
        let bot = placed.remove(0);
        self.add_bot(Some(bot.id), bot.angle, bot.position)?;
        Ok(bot.id)
    }

    /// Place `count` single bots in `domain`. Fails with `CapacityExhausted`
    /// before drawing anything when fewer than `count` ids are free.
    pub fn fill(
        &mut self,
        domain: Domain,
        count: usize,
        bounds_angle: (f64, f64),
    ) -> Result<Vec<BotId>> {
        self.ensure_free(count)?;
        (0..count)
            .map(|_| self.place_bot(domain, bounds_angle))
            .collect()
    }

    /// Structure placement in an arbitrary domain; ids are allocated fresh.
    pub fn place_structure(
        &mut self,
        structure: &Structure,
        domain: Domain,
        bounds_angle: (f64, f64),
    ) -> Result<Vec<BotId>> {
        self.ensure_free(structure.len())?;
        let members = structure.members();
        let placed = self.draw_until_free(domain, bounds_angle, |origin, angle| {
            shift(&rotate_around(members, Point::zeros(), angle), origin)
        })?;
        self.add_structure(&Structure::new(placed), Point::zeros(), 0.0)
    }

    fn draw_until_free<T, F>(
        &mut self,
        domain: Domain,
        bounds_angle: (f64, f64),
        mut build: F,
    ) -> Result<Vec<T>>
    where
        T: Posed,
        F: FnMut(Point, f64) -> Vec<T>,
    {
        let mut attempts: u64 = 0;
        loop {
            if let Some(max) = self.placement.max_attempts {
                if attempts >= max {
                    warn!(attempts, bots = self.bots.len(), "placement attempts exhausted");
                    return Err(SwarmError::PlacementExhausted { attempts });
                }
            }
            attempts += 1;
            let origin = domain.sample(&mut self.rng);
            let angle = sample_angle(bounds_angle, &mut self.rng);
            let candidate = build(origin, angle);
            let blocked = candidate
                .iter()
                .any(|member| collides_with_any(member, &self.bots));
            if !blocked {
                debug!(attempts, members = candidate.len(), "placement accepted");
                return Ok(candidate);
            }
        }
    }
}

