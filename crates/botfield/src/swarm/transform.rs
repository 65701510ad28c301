//! Rigid transforms of bot lists (rotation about a point, translation).
//!
//! Rotation recomputes each orientation from the rotated nose point rather
//! than adding the angle, so results carry the same rounding as the nose
//! geometry and come back normalised to `(-180, 180]`.

use crate::geom::{polar_angle_deg, rotate, sum, Point};
use crate::shape::{nose_point, Posed};

/// Rotate every pose about `center` by `angle_deg`.
pub fn rotate_around<T: Posed>(items: &[T], center: Point, angle_deg: f64) -> Vec<T> {
    items
        .iter()
        .map(|item| {
            let new_center = rotate(item.position(), center, angle_deg);
            let new_nose = rotate(nose_point(item), center, angle_deg);
            item.with_pose(polar_angle_deg(new_center, new_nose), new_center)
        })
        .collect()
}

/// Translate every pose by `vector`; orientations are unchanged.
pub fn shift<T: Posed>(items: &[T], vector: Point) -> Vec<T> {
    items
        .iter()
        .map(|item| item.with_pose(item.angle(), sum(item.position(), vector, 1.0)))
        .collect()
}

/// Smallest signed difference between two headings, in `(-180, 180]`.
#[cfg(test)]
pub(crate) fn heading_delta(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}
