//! Error type shared by the container, the allocator and persistence.

use std::fmt;

use crate::geom::Point;

/// Everything the configuration container can fail with.
#[derive(Debug)]
pub enum SwarmError {
    /// Identifier outside `[0, capacity)`.
    InvalidIdentifier { id: i64, capacity: usize },
    /// No free identifier left for auto-allocation.
    CapacityExhausted { capacity: usize },
    /// The same identifier appears twice in loaded records.
    DuplicateIdentifier { id: u32 },
    /// A structure-template record that is not an explicit `{angle, position, id?}` object.
    InvalidStructureRecord { index: usize, reason: String },
    /// A capped rejection loop gave up without finding a collision-free draw.
    PlacementExhausted { attempts: u64 },
    /// Orientation or position is NaN or infinite.
    NonFinitePose { angle: f64, x: f64, y: f64 },
    Io(std::io::Error),
    Format(serde_json::Error),
}

impl SwarmError {
    /// `Ok` when the pose can be stored and written as JSON numbers.
    pub(crate) fn check_pose(angle: f64, position: Point) -> Result<()> {
        if angle.is_finite() && position.x.is_finite() && position.y.is_finite() {
            return Ok(());
        }
        Err(Self::NonFinitePose {
            angle,
            x: position.x,
            y: position.y,
        })
    }

    pub(crate) fn structure_record(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidStructureRecord {
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SwarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier { id, capacity } => {
                write!(f, "identifier {id} outside [0, {capacity})")
            }
            Self::CapacityExhausted { capacity } => {
                write!(f, "all {capacity} identifiers are in use")
            }
            Self::DuplicateIdentifier { id } => write!(f, "identifier {id} appears more than once"),
            Self::InvalidStructureRecord { index, reason } => {
                write!(f, "invalid structure record #{index}: {reason}")
            }
            Self::PlacementExhausted { attempts } => {
                write!(f, "no collision-free placement found in {attempts} attempts")
            }
            Self::NonFinitePose { angle, x, y } => {
                write!(f, "non-finite pose: angle {angle}, position ({x}, {y})")
            }
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Format(err) => write!(f, "malformed configuration data: {err}"),
        }
    }
}

impl std::error::Error for SwarmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SwarmError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SwarmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err)
    }
}

pub type Result<T> = std::result::Result<T, SwarmError>;
