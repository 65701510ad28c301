//! JSON persistence for configurations.
//!
//! Schema: an array of `{ "id": int, "angle": float, "position": [x, y] }`,
//! in insertion order. Angles and coordinates are always finite JSON numbers.
//! Loading validates every record (id range, no repeats)
//! before the container is touched, so a rejected file leaves it unchanged.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Configuration, IdAllocator};
use crate::error::{Result, SwarmError};
use crate::geom::Point;
use crate::shape::Bot;

/// On-disk form of one bot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotRecord {
    pub id: i64,
    pub angle: f64,
    pub position: [f64; 2],
}

impl From<&Bot> for BotRecord {
    fn from(bot: &Bot) -> Self {
        Self {
            id: i64::from(bot.id),
            angle: bot.angle,
            position: [bot.position.x, bot.position.y],
        }
    }
}

/// Validate records against a pool of `ids.capacity()`; `ids` ends up holding exactly their ids.
fn records_to_bots(records: Vec<BotRecord>, ids: &mut IdAllocator) -> Result<Vec<Bot>> {
    let bots = records
        .into_iter()
        .map(|rec| {
            let id = ids.check(rec.id)?;
            let position = Point::new(rec.position[0], rec.position[1]);
            SwarmError::check_pose(rec.angle, position)?;
            Ok(Bot::new(id, rec.angle, position))
        })
        .collect::<Result<Vec<_>>>()?;
    ids.rebuild(bots.iter().map(|b| b.id))?;
    Ok(bots)
}

/// Decode and validate bots from a JSON reader.
pub fn read_bots<R: Read>(reader: R, capacity: usize) -> Result<Vec<Bot>> {
    let records: Vec<BotRecord> = serde_json::from_reader(reader)?;
    records_to_bots(records, &mut IdAllocator::new(capacity))
}

/// Encode bots as pretty-printed JSON records. Non-finite poses are refused
/// before anything is written.
pub fn write_bots<W: Write>(writer: W, bots: &[Bot]) -> Result<()> {
    for bot in bots {
        SwarmError::check_pose(bot.angle, bot.position)?;
    }
    let records: Vec<BotRecord> = bots.iter().map(BotRecord::from).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

impl Configuration {
    pub fn to_records(&self) -> Vec<BotRecord> {
        self.bots.iter().map(BotRecord::from).collect()
    }

    /// Replace the whole configuration with `records`.
    pub fn replace_with_records(&mut self, records: Vec<BotRecord>) -> Result<()> {
        let mut ids = IdAllocator::new(self.ids.capacity());
        let bots = records_to_bots(records, &mut ids)?;
        self.bots = bots;
        self.ids = ids;
        Ok(())
    }

    pub fn save_to<W: Write>(&self, writer: W) -> Result<()> {
        write_bots(writer, &self.bots)
    }

    pub fn load_from<R: Read>(&mut self, reader: R) -> Result<()> {
        let records: Vec<BotRecord> = serde_json::from_reader(reader)?;
        self.replace_with_records(records)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        self.load_from(reader)
    }
}
