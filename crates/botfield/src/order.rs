//! Pairwise orientational order parameter `F`.
//!
//! Definition
//! - For every ordered pair `(i, j)`, `i != j`, add
//!   `exp(-|nose_i - nose_j| / L) · exp(i · K · |θ_i - θ_j| · π/180)` to a
//!   complex total; `F` is the modulus of that total. Each unordered pair
//!   therefore contributes twice.
//! - Reference constants: `K = 8`, `L = LENGTH`.
//!
//! Notes
//! - Orientations enter raw and the kernel uses `|θ_i - θ_j|`: adding 360° to
//!   one heading can turn a pair's phase into its conjugate, so headings that
//!   differ by full turns are not identified. Stored configurations are
//!   scored as-is.
//! - Every pair contributes; there is no distance cutoff.

use nalgebra::Complex;

use crate::geom::{distance, Point};
use crate::shape::{nose_point, Posed, LENGTH};

/// Constants of the pair kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderCfg {
    /// Angular wave number `K`.
    pub wave_number: f64,
    /// Distance decay length `L`, in centimeters.
    pub decay_length: f64,
}

impl Default for OrderCfg {
    fn default() -> Self {
        Self {
            wave_number: 8.0,
            decay_length: LENGTH,
        }
    }
}

/// `F` with the reference constants.
pub fn order_parameter<P: Posed>(bots: &[P]) -> f64 {
    order_parameter_with(bots, OrderCfg::default())
}

/// `F` with caller-chosen constants.
pub fn order_parameter_with<P: Posed>(bots: &[P], cfg: OrderCfg) -> f64 {
    let noses: Vec<Point> = bots.iter().map(nose_point).collect();
    let mut total = Complex::new(0.0, 0.0);
    for (i, (bi, ni)) in bots.iter().zip(noses.iter()).enumerate() {
        for (j, (bj, nj)) in bots.iter().zip(noses.iter()).enumerate() {
            if i == j {
                continue;
            }
            let weight = (-distance(*ni, *nj) / cfg.decay_length).exp();
            let phase = cfg.wave_number * (bi.angle() - bj.angle()).abs().to_radians();
            total += Complex::from_polar(weight, phase);
        }
    }
    total.norm()
}
