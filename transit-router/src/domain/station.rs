//! Station types.

use serde::{Deserialize, Serialize};

use super::{LineId, StationId};

/// Lifecycle status shared by every network row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    /// Returns true for rows that take part in routing and export.
    pub fn is_active(self) -> bool {
        self == Status::Active
    }
}

/// WGS84 position of a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A station on one line.
///
/// A physical interchange is modelled as several stations (one per line)
/// that usually share the same display `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,

    /// Display name, e.g. "Siam"
    pub name: String,

    /// Short line-position code, e.g. "CEN"
    #[serde(default)]
    pub code: Option<String>,

    /// Owning line
    #[serde(default)]
    pub line_id: Option<LineId>,

    #[serde(default)]
    pub location: Option<Coordinates>,

    #[serde(default)]
    pub is_interchange: bool,

    #[serde(default)]
    pub status: Status,
}

impl Station {
    /// Create an active station with only an id, name and line.
    pub fn new(id: StationId, name: impl Into<String>, line_id: LineId) -> Self {
        Self {
            id,
            name: name.into(),
            code: None,
            line_id: Some(line_id),
            location: None,
            is_interchange: false,
            status: Status::Active,
        }
    }

    /// Set the short code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Mark this station as part of an interchange.
    pub fn interchange(mut self) -> Self {
        self.is_interchange = true;
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}
