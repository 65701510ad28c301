use nalgebra::Vector2;

/// A point (or free vector) in the plane, in centimeters.
pub type Point = Vector2<f64>;

/// `p1 + scale · p2`.
#[inline]
pub fn sum(p1: Point, p2: Point, scale: f64) -> Point {
    p1 + p2 * scale
}

/// Rotate `p` about `center` by `angle_deg` (counter-clockwise).
#[inline]
pub fn rotate(p: Point, center: Point, angle_deg: f64) -> Point {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let rel = sum(p, center, -1.0);
    let rot = Point::new(rel.x * c - rel.y * s, rel.x * s + rel.y * c);
    sum(center, rot, 1.0)
}

#[inline]
pub fn norm(p: Point) -> f64 {
    (p.x * p.x + p.y * p.y).sqrt()
}

#[inline]
pub fn distance(p1: Point, p2: Point) -> f64 {
    norm(sum(p2, p1, -1.0))
}

/// Direction from `from` to `to` in degrees, in `(-180, 180]`.
#[inline]
pub fn polar_angle_deg(from: Point, to: Point) -> f64 {
    let d = sum(to, from, -1.0);
    d.y.atan2(d.x).to_degrees()
}
