//! Agent shape model: the bot footprint, its nose point and the collision predicate.
//!
//! Model
//! - A bot is a rounded-rear teardrop approximated by a fixed hexagon. In the
//!   canonical frame the centre is the origin and the nose lies on +x at
//!   `NOSE_OFFSET`; every bot shares these constants.
//! - A pose (angle in degrees, centre position) places the canonical hexagon:
//!   rotate about the origin first, then translate.
//! - Two bots collide iff some footprint edge of one meets some footprint
//!   edge of the other (closed segments, so touching counts).
//!
//! Broad phase
//! - No footprint vertex lies farther than `NOSE_OFFSET` from its centre, so
//!   centres more than `BROAD_PHASE_CUTOFF = 2 · NOSE_OFFSET` apart can never
//!   collide. Population-wide checks filter with `within_broad_phase` first;
//!   changing the footprint means re-deriving this bound.

use crate::geom::{distance, rotate, segments_intersect, sum, Point};

/// Radius of the rounded rear, in centimeters.
pub const REAR_RADIUS: f64 = 2.5;
/// Half opening angle of the nose wedge, in degrees.
pub const NOSE_HALF_ANGLE_DEG: f64 = 22.5;
/// Tip-to-tail length: `REAR_RADIUS + REAR_RADIUS / sin(NOSE_HALF_ANGLE)`.
pub const LENGTH: f64 = 9.032_814_824_381_884;
/// Distance from the centre to the nose tip.
pub const NOSE_OFFSET: f64 = LENGTH - REAR_RADIUS;
/// Largest centre separation at which two footprints can touch.
pub const BROAD_PHASE_CUTOFF: f64 = 2.0 * NOSE_OFFSET;
/// Reference area of one bot (cm²) used to size domains for a packing density.
pub const BOT_AREA: f64 = 27.3607;

/// Canonical footprint hexagon, counter-clockwise from the nose.
pub const FOOTPRINT: [(f64, f64); 6] = [
    (NOSE_OFFSET, 0.0),
    (0.957, 2.310),
    (-1.389, 2.079),
    (-2.5, 0.0),
    (-1.389, -2.079),
    (0.957, -2.310),
];

/// Bot identifier, unique within a configuration.
pub type BotId = u32;

/// Anything placed by an orientation (degrees) and a centre.
pub trait Posed: Clone {
    fn angle(&self) -> f64;
    fn position(&self) -> Point;
    /// Same record with a new pose (identifiers and tags are kept).
    fn with_pose(&self, angle: f64, position: Point) -> Self;
}

/// One placed bot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bot {
    pub id: BotId,
    pub angle: f64,
    pub position: Point,
}

impl Bot {
    #[inline]
    pub fn new(id: BotId, angle: f64, position: Point) -> Self {
        Self {
            id,
            angle,
            position,
        }
    }
}

impl Posed for Bot {
    #[inline]
    fn angle(&self) -> f64 {
        self.angle
    }
    #[inline]
    fn position(&self) -> Point {
        self.position
    }
    #[inline]
    fn with_pose(&self, angle: f64, position: Point) -> Self {
        Self::new(self.id, angle, position)
    }
}

#[inline]
fn place_canonical(local: Point, angle: f64, position: Point) -> Point {
    sum(position, rotate(local, Point::zeros(), angle), 1.0)
}

/// Footprint hexagon of `pose` in world coordinates.
pub fn footprint_polygon<P: Posed>(pose: &P) -> [Point; 6] {
    let (angle, position) = (pose.angle(), pose.position());
    FOOTPRINT.map(|(x, y)| place_canonical(Point::new(x, y), angle, position))
}

/// Nose tip of `pose` in world coordinates.
pub fn nose_point<P: Posed>(pose: &P) -> Point {
    place_canonical(Point::new(NOSE_OFFSET, 0.0), pose.angle(), pose.position())
}

/// Centres close enough that the exact test is needed.
#[inline]
pub fn within_broad_phase<A: Posed, B: Posed>(a: &A, b: &B) -> bool {
    distance(a.position(), b.position()) <= BROAD_PHASE_CUTOFF
}

/// Exact footprint collision: any of the 36 edge pairs intersect.
pub fn collide<A: Posed, B: Posed>(a: &A, b: &B) -> bool {
    let pa = footprint_polygon(a);
    let pb = footprint_polygon(b);
    let n = pa.len();
    let m = pb.len();
    (0..n).any(|i| {
        let (a0, a1) = (pa[(i + n - 1) % n], pa[i]);
        (0..m).any(|j| segments_intersect(a0, a1, pb[(j + m - 1) % m], pb[j]))
    })
}

/// Whether `candidate` collides with any of `population`, broad phase first.
pub fn collides_with_any<'a, P, I>(candidate: &P, population: I) -> bool
where
    P: Posed,
    I: IntoIterator<Item = &'a Bot>,
{
    population
        .into_iter()
        .filter(|other| within_broad_phase(candidate, *other))
        .any(|other| collide(candidate, other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn bot(id: BotId, angle: f64, x: f64, y: f64) -> Bot {
        Bot::new(id, angle, Point::new(x, y))
    }

    #[test]
    fn constants_match_their_definitions() {
        let length = REAR_RADIUS + REAR_RADIUS / NOSE_HALF_ANGLE_DEG.to_radians().sin();
        assert!((LENGTH - length).abs() < 1e-12);
        assert!((NOSE_OFFSET - 6.532_814_824_381_884).abs() < 1e-12);
    }

    #[test]
    fn no_vertex_beyond_nose_offset() {
        for (x, y) in FOOTPRINT {
            assert!(Point::new(x, y).norm() <= NOSE_OFFSET + 1e-12);
        }
    }

    #[test]
    fn nose_follows_orientation() {
        let b = bot(0, 90.0, 1.0, 2.0);
        let nose = nose_point(&b);
        assert!((nose - Point::new(1.0, 2.0 + NOSE_OFFSET)).norm() < 1e-9);
        let poly = footprint_polygon(&b);
        assert!((poly[0] - nose).norm() < 1e-12);
    }

    #[test]
    fn footprint_translates_with_position() {
        let here = footprint_polygon(&bot(0, 30.0, 0.0, 0.0));
        let there = footprint_polygon(&bot(0, 30.0, 4.0, -3.0));
        for (a, b) in here.iter().zip(there.iter()) {
            assert!((b - a - Point::new(4.0, -3.0)).norm() < 1e-12);
        }
    }

    #[test]
    fn identical_poses_collide() {
        let a = bot(0, 17.0, 3.0, 3.0);
        assert!(collide(&a, &a));
    }

    #[test]
    fn nose_into_rear_collides() {
        // Rear of the second bot sits at x = 5.5, inside the nose wedge of the first.
        assert!(collide(&bot(0, 0.0, 0.0, 0.0), &bot(1, 0.0, 8.0, 0.0)));
    }

    #[test]
    fn nose_short_of_rear_is_free() {
        // Nose at 6.53, rear of the second at 7.5.
        assert!(!collide(&bot(0, 0.0, 0.0, 0.0), &bot(1, 0.0, 10.0, 0.0)));
    }

    #[test]
    fn side_by_side_clearance() {
        assert!(!collide(&bot(0, 0.0, 0.0, 0.0), &bot(1, 0.0, 0.0, 5.0)));
        assert!(collide(&bot(0, 0.0, 0.0, 0.0), &bot(1, 0.0, 0.0, 4.0)));
    }

    #[test]
    fn nose_to_nose_just_inside_cutoff_collides() {
        let a = bot(0, 0.0, 0.0, 0.0);
        let b = bot(1, 180.0, BROAD_PHASE_CUTOFF - 1e-6, 0.0);
        assert!(within_broad_phase(&a, &b));
        assert!(collide(&a, &b));
    }

    #[test]
    fn beyond_cutoff_never_collides_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let theta: f64 = rng.gen_range(0.0..360.0);
            let d = BROAD_PHASE_CUTOFF + rng.gen_range(1e-6..5.0);
            let a = bot(0, rng.gen_range(-360.0..360.0), 0.0, 0.0);
            let dir = rotate(Point::new(d, 0.0), Point::zeros(), theta);
            let b = bot(1, rng.gen_range(-360.0..360.0), dir.x, dir.y);
            assert!(!within_broad_phase(&a, &b));
            assert!(!collide(&a, &b));
        }
    }

    #[test]
    fn collides_with_any_filters_population() {
        let population = vec![bot(0, 0.0, 0.0, 0.0), bot(1, 0.0, 50.0, 0.0)];
        assert!(collides_with_any(&bot(9, 0.0, 49.0, 1.0), &population));
        assert!(!collides_with_any(&bot(9, 0.0, 25.0, 0.0), &population));
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(
            a in -180.0f64..180.0, b in -180.0f64..180.0,
            x in -15.0f64..15.0, y in -15.0f64..15.0,
        ) {
            let p = bot(0, a, 0.0, 0.0);
            let q = bot(1, b, x, y);
            prop_assert_eq!(collide(&p, &q), collide(&q, &p));
        }

    }
}
