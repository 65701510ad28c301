//! Planar geometric kernel (points, rotations, segment tests).
//!
//! Purpose
//! - Provide the small set of pure 2D primitives the shape model and the
//!   placement loop are built on: point algebra, rotation about a centre,
//!   polar angles in degrees, the orientation test and segment intersection.
//! - Angles cross this API in degrees; radians stay internal.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>` (alias `Point`), owned by value.
//! - Rotations are counter-clockwise for positive angles.
//! - `orientation` uses an absolute epsilon (`ORIENTATION_EPS`) on the cross
//!   product; callers with other length scales pass their own.
//!
//! Code cross-refs: `shape::{footprint_polygon, collide}`, `swarm::transform`.

mod point;
mod segment;

pub use point::{distance, norm, polar_angle_deg, rotate, sum, Point};
pub use segment::{
    in_bounding_box, orientation, orientation_default, segments_intersect, Orientation,
    ORIENTATION_EPS,
};
