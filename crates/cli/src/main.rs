use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use botfield::api::{
    order_parameter, read_bots, Configuration, Domain, PlacementCfg, Structure, SwarmCfg,
    SwarmError, MAX_IDS, NOSE_OFFSET,
};

mod provenance;
mod table;

use provenance::{write_sidecar, Payload};
use table::ScoreRow;

#[derive(Parser)]
#[command(name = "botfield-cli")]
#[command(about = "Generate and score random bot configurations")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Fill a density-sized field with random non-overlapping configurations
    Generate(GenerateArgs),
    /// Print the order parameter F of saved configurations
    Score(ScoreArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DomainKind {
    Square,
    Disk,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, value_enum, default_value = "disk")]
    domain: DomainKind,
    /// Single bots per configuration
    #[arg(long, default_value_t = 0)]
    bots: usize,
    /// Structures per configuration, placed before the single bots
    #[arg(long, default_value_t = 0)]
    structures: usize,
    /// Structure template (JSON array of {angle, position, id?})
    #[arg(long, conflicts_with = "ring")]
    structure: Option<PathBuf>,
    /// Use a generated ring of K bots facing its centre as the template
    #[arg(long)]
    ring: Option<usize>,
    #[arg(long, default_value_t = NOSE_OFFSET + 0.5)]
    ring_radius: f64,
    /// Packing density: total bot area over field area
    #[arg(long)]
    density: f64,
    #[arg(long, default_value_t = 0.0)]
    angle_min: f64,
    #[arg(long, default_value_t = 360.0)]
    angle_max: f64,
    #[arg(long, default_value_t = 1)]
    realisations: usize,
    /// Base seed; realisation i uses seed + i
    #[arg(long)]
    seed: Option<u64>,
    /// Give up on a placement after this many rejected draws
    #[arg(long)]
    max_attempts: Option<u64>,
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Write a score table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write a score table as Parquet
    #[arg(long)]
    parquet: Option<PathBuf>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate(args) => generate(&args).map(|_| ()),
        Action::Score(args) => score(&args).map(|_| ()),
        Action::Report => report(),
    }
}

fn template(args: &GenerateArgs) -> Result<Option<Structure>> {
    let template = match (&args.structure, args.ring) {
        (Some(path), _) => Some(
            Structure::load(path)
                .with_context(|| format!("reading structure {}", path.display()))?,
        ),
        (None, Some(k)) => Some(Structure::ring(k, args.ring_radius)),
        (None, None) => None,
    };
    if args.structures > 0 && template.as_ref().map_or(true, Structure::is_empty) {
        bail!("--structures needs a non-empty --structure FILE or --ring K");
    }
    Ok(template)
}

/// Field whose area is the total bot area divided by `density`.
fn field(kind: DomainKind, bots: usize, density: f64) -> Result<Domain> {
    if !(density > 0.0 && density <= 1.0) {
        bail!("density must lie in (0, 1], got {density}");
    }
    if bots == 0 {
        bail!("nothing to place: set --bots and/or --structures");
    }
    Ok(match kind {
        DomainKind::Square => Domain::square_for_density(bots, density),
        DomainKind::Disk => Domain::disk_for_density(bots, density),
    })
}

fn generate(args: &GenerateArgs) -> Result<Vec<PathBuf>> {
    let template = template(args)?;
    let per_structure = template.as_ref().map_or(0, Structure::len);
    let total = args.bots + args.structures * per_structure;
    if total > MAX_IDS {
        return Err(SwarmError::CapacityExhausted { capacity: MAX_IDS })
            .with_context(|| format!("{total} bots requested per configuration"));
    }
    let domain = field(args.domain, total, args.density)?;
    let angles = (args.angle_min, args.angle_max);
    tracing::info!(
        bots = args.bots,
        structures = args.structures,
        total,
        area = domain.area(),
        "generate"
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let mut payload = Payload::new(
        "generate",
        json!({
            "domain": format!("{:?}", args.domain).to_lowercase(),
            "bots": args.bots,
            "structures": args.structures,
            "structure": args.structure.as_ref().map(|p| p.to_string_lossy().into_owned()),
            "ring": args.ring,
            "ring_radius": args.ring_radius,
            "density": args.density,
            "angles": [args.angle_min, args.angle_max],
            "realisations": args.realisations,
            "seed": args.seed,
            "max_attempts": args.max_attempts,
        }),
    );

    let mut written = Vec::with_capacity(args.realisations);
    for i in 0..args.realisations {
        let cfg = SwarmCfg {
            capacity: MAX_IDS,
            seed: args.seed.map(|s| s.wrapping_add(i as u64)),
            placement: PlacementCfg {
                max_attempts: args.max_attempts,
            },
        };
        let mut swarm = Configuration::new(cfg);
        if let Some(template) = &template {
            for _ in 0..args.structures {
                swarm
                    .place_structure(template, domain, angles)
                    .with_context(|| format!("placing structure in realisation {i}"))?;
            }
        }
        swarm
            .fill(domain, args.bots, angles)
            .with_context(|| format!("placing bots in realisation {i}"))?;
        let path = args.out_dir.join(format!("{i}.json"));
        swarm
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        let f = order_parameter(swarm.bots());
        tracing::info!(file = %path.display(), bots = swarm.len(), f, "generated");
        payload.push_output(&path);
        written.push(path);
    }
    write_sidecar(&args.out_dir, &payload)?;
    Ok(written)
}

fn score_one(path: &Path) -> Result<ScoreRow> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let bots = read_bots(BufReader::new(file), MAX_IDS)
        .with_context(|| format!("reading {}", path.display()))?;
    let f = order_parameter(&bots);
    tracing::info!(file = %path.display(), bots = bots.len(), f, "scored");
    Ok(ScoreRow {
        file: path.to_string_lossy().into_owned(),
        bots: bots.len(),
        f,
    })
}

fn score(args: &ScoreArgs) -> Result<Vec<ScoreRow>> {
    let rows = args
        .files
        .iter()
        .map(|path| score_one(path))
        .collect::<Result<Vec<_>>>()?;
    if let [row] = rows.as_slice() {
        println!("{}", row.f);
    } else {
        for row in &rows {
            println!("{}\t{}", row.file, row.f);
        }
    }

    if args.csv.is_none() && args.parquet.is_none() {
        return Ok(rows);
    }
    let mut df = table::score_frame(&rows)?;
    let (mean, std) = table::summary(&df)?;
    tracing::info!(files = rows.len(), mean = ?mean, std = ?std, "score_summary");
    if let Some(path) = &args.csv {
        table::write_csv(&mut df, path)?;
    }
    if let Some(path) = &args.parquet {
        table::write_parquet(&mut df, path)?;
    }
    Ok(rows)
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new("report", json!({})));
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use botfield::shape::collide;
    use tempfile::tempdir;

    fn args(out_dir: PathBuf) -> GenerateArgs {
        GenerateArgs {
            domain: DomainKind::Disk,
            bots: 12,
            structures: 0,
            structure: None,
            ring: None,
            ring_radius: NOSE_OFFSET + 0.5,
            density: 0.1,
            angle_min: 0.0,
            angle_max: 360.0,
            realisations: 2,
            seed: Some(11),
            max_attempts: Some(100_000),
            out_dir,
        }
    }

    #[test]
    fn field_area_follows_density() {
        let sq = field(DomainKind::Square, 10, 0.25).unwrap();
        let disk = field(DomainKind::Disk, 10, 0.25).unwrap();
        let expected = 10.0 * botfield::api::BOT_AREA / 0.25;
        assert!((sq.area() - expected).abs() < 1e-9);
        assert!((disk.area() - expected).abs() < 1e-9);
        assert!(field(DomainKind::Disk, 10, 0.0).is_err());
        assert!(field(DomainKind::Disk, 0, 0.2).is_err());
    }

    #[test]
    fn generate_writes_files_and_sidecar() {
        let dir = tempdir().unwrap();
        let written = generate(&args(dir.path().to_path_buf())).unwrap();
        assert_eq!(written.len(), 2);
        for path in &written {
            let row = score_one(path).unwrap();
            assert_eq!(row.bots, 12);
            let bots = read_bots(BufReader::new(File::open(path).unwrap()), MAX_IDS).unwrap();
            for (i, a) in bots.iter().enumerate() {
                for b in &bots[i + 1..] {
                    assert!(!collide(a, b));
                }
            }
        }
        assert!(dir.path().join(provenance::SIDECAR_NAME).exists());
    }

    #[test]
    fn same_seed_same_files() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        let wa = generate(&args(a.path().to_path_buf())).unwrap();
        let wb = generate(&args(b.path().to_path_buf())).unwrap();
        for (pa, pb) in wa.iter().zip(&wb) {
            assert_eq!(
                std::fs::read_to_string(pa).unwrap(),
                std::fs::read_to_string(pb).unwrap()
            );
        }
    }

    #[test]
    fn structures_come_from_ring() {
        let dir = tempdir().unwrap();
        let mut a = args(dir.path().to_path_buf());
        a.bots = 4;
        a.structures = 2;
        a.ring = Some(8);
        a.realisations = 1;
        let written = generate(&a).unwrap();
        let row = score_one(&written[0]).unwrap();
        assert_eq!(row.bots, 20);
    }

    #[test]
    fn generated_files_score_with_tables() {
        let dir = tempdir().unwrap();
        let written = generate(&args(dir.path().to_path_buf())).unwrap();
        let csv = dir.path().join("scores.csv");
        let parquet = dir.path().join("scores.parquet");
        let rows = score(&ScoreArgs {
            files: written.clone(),
            csv: Some(csv.clone()),
            parquet: Some(parquet.clone()),
        })
        .unwrap();
        assert_eq!(rows.len(), written.len());
        assert!(rows.iter().all(|r| r.bots == 12 && r.f.is_finite()));
        let text = std::fs::read_to_string(&csv).unwrap();
        assert_eq!(text.lines().count(), written.len() + 1);
        let back = table::read_parquet(&parquet).unwrap();
        assert_eq!(back.shape(), (written.len(), 4));
    }

    #[test]
    fn generate_refuses_more_bots_than_ids() {
        let dir = tempdir().unwrap();
        let mut a = args(dir.path().to_path_buf());
        a.bots = MAX_IDS + 1;
        let err = generate(&a).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SwarmError>(),
            Some(SwarmError::CapacityExhausted { capacity }) if *capacity == MAX_IDS
        ));
        assert!(!dir.path().join("0.json").exists());
    }

    #[test]
    fn full_id_pool_round_trips_through_score() {
        let dir = tempdir().unwrap();
        let mut a = args(dir.path().to_path_buf());
        a.bots = 0;
        a.structures = MAX_IDS / 8;
        a.ring = Some(8);
        a.density = 0.05;
        a.realisations = 1;
        let written = generate(&a).unwrap();
        let row = score_one(&written[0]).unwrap();
        assert_eq!(row.bots, MAX_IDS);
    }

    #[test]
    fn structures_without_template_fail() {
        let dir = tempdir().unwrap();
        let mut a = args(dir.path().to_path_buf());
        a.structures = 1;
        assert!(generate(&a).is_err());
    }
}
