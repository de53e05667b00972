//! Line and interchange point types.

use serde::{Deserialize, Serialize};

use super::{LineId, Status};

/// A transit line, e.g. "Sukhumvit Line".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,

    /// Brand colour as a CSS hex string
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub status: Status,
}

impl Line {
    /// Create an active line.
    pub fn new(id: LineId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: None,
            status: Status::Active,
        }
    }

    /// Set the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

/// A named physical location where stations of several lines are within
/// walking distance of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterchangePoint {
    pub id: i64,
    pub name: String,

    #[serde(default)]
    pub status: Status,
}
