//! Density sweep probe for the order parameter.
//!
//! Purpose
//! - Give a quick, reproducible data point for how `F / 7N` moves with packing
//!   density before launching a full batch through `botfield-cli`.
//!
//! Usage:
//!   cargo run -p botfield --release --example density_probe -- [bots] [seed]
//!
//! Prints one line per density with the mean `F / 7N` over a few realisations
//! and the wall time of the fill.

use std::time::Instant;

use botfield::prelude::*;
use botfield::swarm::MAX_IDS;

const DENSITIES: [f64; 5] = [0.05, 0.1, 0.2, 0.3, 0.4];
const REALISATIONS: u64 = 4;

fn main() {
    let mut args = std::env::args().skip(1);
    let bots: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(100);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    if bots == 0 || bots > MAX_IDS {
        eprintln!("bots must lie in [1, {MAX_IDS}], got {bots}");
        return;
    }

    for density in DENSITIES {
        let domain = Domain::disk_for_density(bots, density);
        let start = Instant::now();
        let mut acc = 0.0;
        for r in 0..REALISATIONS {
            let mut cfg = Configuration::new(SwarmCfg::seeded(seed + r));
            if let Err(err) = cfg.fill(domain, bots, (0.0, 360.0)) {
                eprintln!("density={density:.2} bots={bots}: {err}");
                return;
            }
            acc += order_parameter(cfg.bots()) / (7.0 * bots as f64);
        }
        let elapsed = start.elapsed().as_secs_f64() * 1e3;
        println!(
            "density={density:.2} bots={bots} f_per_7n={:.6} fill_ms={elapsed:.1}",
            acc / REALISATIONS as f64
        );
    }
}
