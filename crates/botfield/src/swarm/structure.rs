//! Rigid structure templates and tagged bot records.
//!
//! A template is an ordered list of `BotSpec` members relative to a local
//! origin. On disk it is a JSON array of `{ "angle", "position", "id"? }`
//! objects; positional arrays (`[angle, [x, y]]`, `[id, angle, [x, y]]`) are
//! refused instead of being told apart by length.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SwarmError};
use crate::geom::{rotate, Point};
use crate::shape::{BotId, Posed};

/// A bot record with an explicit or to-be-allocated identifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BotSpec {
    Explicit {
        id: BotId,
        angle: f64,
        position: Point,
    },
    Auto {
        angle: f64,
        position: Point,
    },
}

impl BotSpec {
    #[inline]
    pub fn auto(angle: f64, position: Point) -> Self {
        Self::Auto { angle, position }
    }

    #[inline]
    pub fn explicit(id: BotId, angle: f64, position: Point) -> Self {
        Self::Explicit {
            id,
            angle,
            position,
        }
    }

    #[inline]
    pub fn id(&self) -> Option<BotId> {
        match *self {
            Self::Explicit { id, .. } => Some(id),
            Self::Auto { .. } => None,
        }
    }

    /// Same pose with the identifier dropped.
    #[inline]
    pub fn into_auto(self) -> Self {
        Self::auto(self.angle(), self.position())
    }
}

impl Posed for BotSpec {
    #[inline]
    fn angle(&self) -> f64 {
        match *self {
            Self::Explicit { angle, .. } | Self::Auto { angle, .. } => angle,
        }
    }
    #[inline]
    fn position(&self) -> Point {
        match *self {
            Self::Explicit { position, .. } | Self::Auto { position, .. } => position,
        }
    }
    #[inline]
    fn with_pose(&self, angle: f64, position: Point) -> Self {
        match *self {
            Self::Explicit { id, .. } => Self::explicit(id, angle, position),
            Self::Auto { .. } => Self::auto(angle, position),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MemberRecord {
    #[serde(default)]
    id: Option<u32>,
    angle: f64,
    position: [f64; 2],
}

/// Immutable rigid template of bots around a local origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Structure {
    members: Vec<BotSpec>,
}

impl Structure {
    pub fn new(members: Vec<BotSpec>) -> Self {
        Self { members }
    }

    #[inline]
    pub fn members(&self) -> &[BotSpec] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `count` bots evenly spaced on a circle of `radius`, each facing the origin.
    pub fn ring(count: usize, radius: f64) -> Self {
        let step = 360.0 / count.max(1) as f64;
        let members = (0..count)
            .map(|k| {
                let a = step * k as f64;
                let center = rotate(Point::new(radius, 0.0), Point::zeros(), a);
                BotSpec::auto(a - 180.0, center)
            })
            .collect();
        Self { members }
    }

    /// Parse a template from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(&value)
    }

    /// Parse a template from an already-decoded JSON array.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let records = value
            .as_array()
            .ok_or_else(|| SwarmError::structure_record(0, "template must be a JSON array"))?;
        let members = records
            .iter()
            .enumerate()
            .map(|(index, record)| parse_member(index, record))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { members })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

fn parse_member(index: usize, record: &Value) -> Result<BotSpec> {
    if record.is_array() {
        return Err(SwarmError::structure_record(
            index,
            "positional records are ambiguous; use {\"angle\", \"position\", \"id\"?}",
        ));
    }
    let rec = MemberRecord::deserialize(record)
        .map_err(|err| SwarmError::structure_record(index, err.to_string()))?;
    let position = Point::new(rec.position[0], rec.position[1]);
    Ok(match rec.id {
        Some(id) => BotSpec::explicit(id, rec.angle, position),
        None => BotSpec::auto(rec.angle, position),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::nose_point;

    #[test]
    fn parses_explicit_and_auto_members() {
        let s = Structure::from_json_str(
            r#"[{"id": 4, "angle": 90.0, "position": [1.0, 2.0]},
                {"angle": -45.0, "position": [0.0, 0.0]}]"#,
        )
        .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.members()[0], BotSpec::explicit(4, 90.0, Point::new(1.0, 2.0)));
        assert_eq!(s.members()[1], BotSpec::auto(-45.0, Point::zeros()));
    }

    #[test]
    fn rejects_positional_records() {
        let err = Structure::from_json_str(r#"[{"angle": 0.0, "position": [0, 0]}, [0.0, [1.0, 1.0]]]"#)
            .unwrap_err();
        assert!(matches!(err, SwarmError::InvalidStructureRecord { index: 1, .. }));
        let err = Structure::from_json_str(r#"[[3, 0.0, [1.0, 1.0]]]"#).unwrap_err();
        assert!(matches!(err, SwarmError::InvalidStructureRecord { index: 0, .. }));
    }

    #[test]
    fn rejects_incomplete_or_non_array_input() {
        let err = Structure::from_json_str(r#"[{"angle": 10.0}]"#).unwrap_err();
        assert!(matches!(err, SwarmError::InvalidStructureRecord { index: 0, .. }));
        let err = Structure::from_json_str(r#"{"angle": 10.0}"#).unwrap_err();
        assert!(matches!(err, SwarmError::InvalidStructureRecord { .. }));
        assert!(matches!(
            Structure::from_json_str("not json"),
            Err(SwarmError::Format(_))
        ));
    }

    #[test]
    fn ring_members_face_the_center() {
        let ring = Structure::ring(8, 10.0);
        assert_eq!(ring.len(), 8);
        for m in ring.members() {
            assert!((m.position().norm() - 10.0).abs() < 1e-9);
            // The nose sits on the segment towards the origin.
            let nose = nose_point(m);
            assert!((nose.norm() - (10.0 - crate::shape::NOSE_OFFSET)).abs() < 1e-9);
            assert!(m.id().is_none());
        }
    }

    #[test]
    fn with_pose_keeps_tag() {
        let e = BotSpec::explicit(7, 0.0, Point::zeros());
        let moved = e.with_pose(10.0, Point::new(1.0, 1.0));
        assert_eq!(moved.id(), Some(7));
        assert_eq!(moved.into_auto().id(), None);
    }
}
