//! Orientation test and closed-segment intersection.
//!
//! The intersection test is the classic four-orientation straddle check plus
//! collinear endpoint containment. Containment uses the min/max bounding box
//! of the segment, so collinear overlaps are found for any segment direction
//! (the endpoint is already known to lie on the supporting line).

use super::point::{sum, Point};

/// Absolute tolerance on the cross product below which three points count as collinear.
pub const ORIENTATION_EPS: f64 = 1e-9;

/// Turn direction of `p1 → p2 → p3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Counter-clockwise (positive cross product).
    Left,
    /// Clockwise (negative cross product).
    Right,
    Collinear,
}

#[inline]
fn cross(v: Point, u: Point) -> f64 {
    v.x * u.y - v.y * u.x
}

/// Sign of `(p2 - p1) × (p3 - p1)`, with `|cross| <= eps` reported as collinear.
#[inline]
pub fn orientation(p1: Point, p2: Point, p3: Point, eps: f64) -> Orientation {
    let val = cross(sum(p2, p1, -1.0), sum(p3, p1, -1.0));
    if val.abs() <= eps {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Left
    } else {
        Orientation::Right
    }
}

/// `orientation` with `ORIENTATION_EPS`.
#[inline]
pub fn orientation_default(p1: Point, p2: Point, p3: Point) -> Orientation {
    orientation(p1, p2, p3, ORIENTATION_EPS)
}

/// Whether `q` lies in the closed axis-aligned bounding box of segment `p1-p2`.
#[inline]
pub fn in_bounding_box(p1: Point, p2: Point, q: Point) -> bool {
    p1.x.min(p2.x) <= q.x
        && q.x <= p1.x.max(p2.x)
        && p1.y.min(p2.y) <= q.y
        && q.y <= p1.y.max(p2.y)
}

/// Closed segments `p1-p2` and `q1-q2` share at least one point.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    use Orientation::Collinear;

    let o1 = orientation_default(p1, p2, q1);
    let o2 = orientation_default(p1, p2, q2);
    let o3 = orientation_default(q1, q2, p1);
    let o4 = orientation_default(q1, q2, p2);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == Collinear && in_bounding_box(p1, p2, q1))
        || (o2 == Collinear && in_bounding_box(p1, p2, q2))
        || (o3 == Collinear && in_bounding_box(q1, q2, p1))
        || (o4 == Collinear && in_bounding_box(q1, q2, p2))
}
