//! Route and transfer edges.

use serde::{Deserialize, Serialize};

use super::{InvalidEdge, LineId, StationId, Status};

/// How a passenger travels along an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Train,
    Walk,
    #[serde(other)]
    Other,
}

/// A directed route segment between two stations on one line.
///
/// Stored rows usually come in forward/reverse pairs, but each row is an
/// independent edge. Distance and duration may be missing on stored rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub line_id: LineId,

    #[serde(rename = "from_station_id")]
    pub from: StationId,

    #[serde(rename = "to_station_id")]
    pub to: StationId,

    #[serde(default)]
    pub distance_km: Option<f64>,

    #[serde(default)]
    pub duration_minutes: Option<u32>,

    #[serde(default)]
    pub mode: TransportMode,

    #[serde(default)]
    pub status: Status,
}

impl Edge {
    /// Create an active train edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_router::domain::{Edge, LineId, StationId};
    ///
    /// let edge = Edge::new(LineId(1), StationId(1), StationId(2), 5.0, 10).unwrap();
    /// assert_eq!(edge.distance_km, Some(5.0));
    ///
    /// assert!(Edge::new(LineId(1), StationId(1), StationId(1), 5.0, 10).is_err());
    /// assert!(Edge::new(LineId(1), StationId(1), StationId(2), 0.0, 10).is_err());
    /// assert!(Edge::new(LineId(1), StationId(1), StationId(2), 5.0, 0).is_err());
    /// ```
    pub fn new(
        line_id: LineId,
        from: StationId,
        to: StationId,
        distance_km: f64,
        duration_minutes: u32,
    ) -> Result<Self, InvalidEdge> {
        if from == to {
            return Err(InvalidEdge::SameStation(from));
        }
        if !(distance_km.is_finite() && distance_km > 0.0) {
            return Err(InvalidEdge::NonPositiveDistance {
                from,
                to,
                distance: distance_km,
            });
        }
        if duration_minutes == 0 {
            return Err(InvalidEdge::NonPositiveDuration { from, to });
        }

        Ok(Self {
            line_id,
            from,
            to,
            distance_km: Some(distance_km),
            duration_minutes: Some(duration_minutes),
            mode: TransportMode::Train,
            status: Status::Active,
        })
    }

    /// Set the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Check a stored row can be used as a routing arc.
    ///
    /// Missing or zero weights are accepted (they take placeholder values);
    /// self-loops and negative or non-finite distances are not.
    pub fn check_stored(&self) -> Result<(), InvalidEdge> {
        if self.from == self.to {
            return Err(InvalidEdge::SameStation(self.from));
        }
        match self.distance_km {
            Some(d) if !d.is_finite() || d < 0.0 => Err(InvalidEdge::NonPositiveDistance {
                from: self.from,
                to: self.to,
                distance: d,
            }),
            _ => Ok(()),
        }
    }

    /// Distance in km, or `placeholder` when missing or zero.
    pub fn distance_or(&self, placeholder: f64) -> f64 {
        match self.distance_km {
            Some(d) if d > 0.0 => d,
            _ => placeholder,
        }
    }

    /// Duration in minutes, or `placeholder` when missing or zero.
    pub fn duration_or(&self, placeholder: u32) -> u32 {
        match self.duration_minutes {
            Some(m) if m > 0 => m,
            _ => placeholder,
        }
    }
}

/// A walking connection between stations of different lines at one
/// interchange point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEdge {
    pub from_line: LineId,

    #[serde(rename = "from_station_id")]
    pub from_station: StationId,

    pub to_line: LineId,

    #[serde(rename = "to_station_id")]
    pub to_station: StationId,

    #[serde(default)]
    pub distance_km: Option<f64>,

    #[serde(default)]
    pub duration_minutes: Option<u32>,

    /// Extra fare or penalty for changing lines; zero is common
    #[serde(default)]
    pub transfer_cost: f64,

    #[serde(default)]
    pub status: Status,
}

impl TransferEdge {
    /// Create an active transfer.
    pub fn new(
        (from_line, from_station): (LineId, StationId),
        (to_line, to_station): (LineId, StationId),
        distance_km: f64,
        duration_minutes: u32,
        transfer_cost: f64,
    ) -> Result<Self, InvalidEdge> {
        if from_station == to_station {
            return Err(InvalidEdge::SameStation(from_station));
        }
        if !(distance_km.is_finite() && distance_km >= 0.0) {
            return Err(InvalidEdge::NonPositiveDistance {
                from: from_station,
                to: to_station,
                distance: distance_km,
            });
        }
        if duration_minutes == 0 {
            return Err(InvalidEdge::NonPositiveDuration {
                from: from_station,
                to: to_station,
            });
        }
        if !(transfer_cost.is_finite() && transfer_cost >= 0.0) {
            return Err(InvalidEdge::NegativeTransferCost {
                from: from_station,
                to: to_station,
                cost: transfer_cost,
            });
        }

        Ok(Self {
            from_line,
            from_station,
            to_line,
            to_station,
            distance_km: Some(distance_km),
            duration_minutes: Some(duration_minutes),
            transfer_cost,
            status: Status::Active,
        })
    }

    /// Set the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(id: i64) -> StationId {
        StationId(id)
    }

    #[test]
    fn new_edge_is_active_train() {
        let edge = Edge::new(LineId(1), sid(1), sid(2), 2.5, 3).unwrap();
        assert_eq!(edge.mode, TransportMode::Train);
        assert!(edge.status.is_active());
        assert_eq!(edge.duration_minutes, Some(3));
    }

    #[test]
    fn rejects_same_station() {
        let err = Edge::new(LineId(1), sid(4), sid(4), 1.0, 1).unwrap_err();
        assert_eq!(err, InvalidEdge::SameStation(sid(4)));
    }

    #[test]
    fn rejects_bad_distance() {
        assert!(matches!(
            Edge::new(LineId(1), sid(1), sid(2), -1.0, 1),
            Err(InvalidEdge::NonPositiveDistance { .. })
        ));
        assert!(matches!(
            Edge::new(LineId(1), sid(1), sid(2), f64::NAN, 1),
            Err(InvalidEdge::NonPositiveDistance { .. })
        ));
    }

    #[test]
    fn rejects_zero_duration() {
        assert!(matches!(
            Edge::new(LineId(1), sid(1), sid(2), 1.0, 0),
            Err(InvalidEdge::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn placeholders_for_missing_weights() {
        let json = r#"{"line_id": 1, "from_station_id": 1, "to_station_id": 2}"#;
        let edge: Edge = serde_json::from_str(json).unwrap();

        assert!(edge.check_stored().is_ok());
        assert_eq!(edge.distance_or(1.0), 1.0);
        assert_eq!(edge.duration_or(10), 10);

        let mut zero = edge.clone();
        zero.distance_km = Some(0.0);
        zero.duration_minutes = Some(0);
        assert_eq!(zero.distance_or(1.0), 1.0);
        assert_eq!(zero.duration_or(10), 10);
    }

    #[test]
    fn stored_row_checks() {
        let json = r#"{"line_id": 1, "from_station_id": 3, "to_station_id": 3}"#;
        let looped: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(looped.check_stored(), Err(InvalidEdge::SameStation(sid(3))));

        let json = r#"{"line_id": 1, "from_station_id": 1, "to_station_id": 2, "distance_km": -4.0}"#;
        let negative: Edge = serde_json::from_str(json).unwrap();
        assert!(negative.check_stored().is_err());
    }

    #[test]
    fn unknown_mode_deserializes_as_other() {
        let json = r#"{"line_id": 1, "from_station_id": 1, "to_station_id": 2, "mode": "ferry"}"#;
        let edge: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.mode, TransportMode::Other);

        let json = r#"{"line_id": 1, "from_station_id": 1, "to_station_id": 2, "mode": "walk"}"#;
        let edge: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.mode, TransportMode::Walk);
    }

    #[test]
    fn transfer_allows_zero_cost() {
        let from = (LineId(1), sid(10));
        let to = (LineId(2), sid(20));
        let t = TransferEdge::new(from, to, 0.2, 4, 0.0).unwrap();
        assert_eq!(t.transfer_cost, 0.0);
        assert!(t.status.is_active());
    }

    #[test]
    fn transfer_rejects_negative_cost() {
        let err = TransferEdge::new((LineId(1), sid(10)), (LineId(2), sid(20)), 0.2, 4, -1.0)
            .unwrap_err();
        assert!(matches!(err, InvalidEdge::NegativeTransferCost { .. }));
    }

    #[test]
    fn transfer_rejects_same_station() {
        let from = (LineId(1), sid(10));
        let to = (LineId(2), sid(10));
        assert!(TransferEdge::new(from, to, 0.2, 4, 0.0).is_err());
    }
}
