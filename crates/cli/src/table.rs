//! Score tables: one row per configuration file, written with polars.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Score of one configuration file.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRow {
    pub file: String,
    pub bots: usize,
    pub f: f64,
}

impl ScoreRow {
    /// `F / 7N`, the study's normalisation; zero for an empty file.
    pub fn f_per_7n(&self) -> f64 {
        if self.bots == 0 {
            0.0
        } else {
            self.f / (7.0 * self.bots as f64)
        }
    }
}

pub fn score_frame(rows: &[ScoreRow]) -> PolarsResult<DataFrame> {
    let files: Vec<&str> = rows.iter().map(|r| r.file.as_str()).collect();
    let bots: Vec<u64> = rows.iter().map(|r| r.bots as u64).collect();
    let f: Vec<f64> = rows.iter().map(|r| r.f).collect();
    let per: Vec<f64> = rows.iter().map(ScoreRow::f_per_7n).collect();
    df!(
        "file" => files,
        "bots" => bots,
        "f" => f,
        "f_per_7n" => per,
    )
}

/// Mean and population standard deviation (`ddof = 0`) of the `f` column.
pub fn summary(df: &DataFrame) -> PolarsResult<(Option<f64>, Option<f64>)> {
    let out = df
        .clone()
        .lazy()
        .select([
            col("f").mean().alias("mean"),
            col("f").std(0).alias("std"),
        ])
        .collect()?;
    let mean = out.column("mean")?.f64()?.get(0);
    let std = out.column("std")?.f64()?.get(0);
    Ok((mean, std))
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    ParquetWriter::new(file)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
pub fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    ParquetReader::new(file)
        .finish()
        .with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ScoreRow> {
        vec![
            ScoreRow {
                file: "0.json".into(),
                bots: 10,
                f: 7.0,
            },
            ScoreRow {
                file: "1.json".into(),
                bots: 10,
                f: 21.0,
            },
        ]
    }

    #[test]
    fn frame_has_normalised_column() {
        let df = score_frame(&rows()).unwrap();
        assert_eq!(df.shape(), (2, 4));
        let per = df.column("f_per_7n").unwrap().f64().unwrap();
        assert!((per.get(0).unwrap() - 0.1).abs() < 1e-12);
        assert!((per.get(1).unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn summary_mean_and_std() {
        let df = score_frame(&rows()).unwrap();
        let (mean, std) = summary(&df).unwrap();
        assert!((mean.unwrap() - 14.0).abs() < 1e-12);
        // Population std of {7, 21}.
        assert!((std.unwrap() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn empty_file_normalises_to_zero() {
        let row = ScoreRow {
            file: "e.json".into(),
            bots: 0,
            f: 0.0,
        };
        assert_eq!(row.f_per_7n(), 0.0);
    }

    #[test]
    fn csv_header_matches_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        let mut df = score_frame(&rows()).unwrap();
        write_csv(&mut df, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("file,bots,f,f_per_7n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn parquet_round_trip_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.parquet");
        let mut df = score_frame(&rows()).unwrap();
        write_parquet(&mut df, &path).unwrap();
        let back = read_parquet(&path).unwrap();
        assert_eq!(back.shape(), (2, 4));
        assert_eq!(back.get_column_names(), df.get_column_names());
        let f = back.column("f").unwrap().f64().unwrap();
        assert_eq!(f.get(1), Some(21.0));
        let files = back.column("file").unwrap().str().unwrap();
        assert_eq!(files.get(0), Some("0.json"));
    }
}
