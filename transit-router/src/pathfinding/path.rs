//! Shortest-path results.

use serde::Serialize;

use crate::domain::StationId;

/// Line label for a hop whose line no longer resolves.
pub const UNKNOWN_LINE: &str = "Unknown Line";

/// A station identified by id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRef {
    pub id: StationId,
    pub name: String,
}

/// One hop between consecutive stations of a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    pub from_id: StationId,
    pub to_id: StationId,
    pub from_name: String,
    pub to_name: String,
    pub line_name: String,
    pub distance_km: f64,
    pub duration_minutes: u32,
}

/// A shortest path between two stations.
///
/// A path from a station to itself has no hops and zero totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub from: StationRef,
    pub to: StationRef,

    /// Visited stations, both endpoints included
    pub stations: Vec<StationId>,

    pub hops: Vec<Hop>,

    /// Sum of hop distances, rounded to 2 decimal places
    pub total_distance_km: f64,

    pub total_duration_minutes: u32,
}

impl Path {
    /// The "already there" path.
    pub fn same_station(station: StationRef) -> Self {
        Self {
            stations: vec![station.id],
            from: station.clone(),
            to: station,
            hops: Vec::new(),
            total_distance_km: 0.0,
            total_duration_minutes: 0,
        }
    }

    /// Assemble a path from its hops, computing the totals.
    pub fn from_hops(from: StationRef, to: StationRef, hops: Vec<Hop>) -> Self {
        let mut stations = vec![from.id];
        stations.extend(hops.iter().map(|h| h.to_id));

        let total_distance_km = round_km(hops.iter().map(|h| h.distance_km).sum());
        let total_duration_minutes = hops
            .iter()
            .fold(0u32, |acc, h| acc.saturating_add(h.duration_minutes));

        Self {
            from,
            to,
            stations,
            hops,
            total_distance_km,
            total_duration_minutes,
        }
    }

    /// Returns true if origin and destination are the same station.
    pub fn is_same_station(&self) -> bool {
        self.from.id == self.to.id
    }

    /// Human-readable summary.
    pub fn message(&self) -> String {
        if self.is_same_station() {
            "Same station selected".to_string()
        } else {
            format!("Route found with {} segments", self.hops.len())
        }
    }
}

/// Round a distance to 2 decimal places.
pub(crate) fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: i64, name: &str) -> StationRef {
        StationRef {
            id: StationId(id),
            name: name.to_string(),
        }
    }

    fn hop(from: i64, to: i64, distance_km: f64, duration_minutes: u32) -> Hop {
        Hop {
            from_id: StationId(from),
            to_id: StationId(to),
            from_name: format!("S{from}"),
            to_name: format!("S{to}"),
            line_name: "Sukhumvit Line".into(),
            distance_km,
            duration_minutes,
        }
    }

    #[test]
    fn same_station_path() {
        let path = Path::same_station(station(4, "Siam"));

        assert!(path.is_same_station());
        assert!(path.hops.is_empty());
        assert_eq!(path.stations, vec![StationId(4)]);
        assert_eq!(path.total_distance_km, 0.0);
        assert_eq!(path.total_duration_minutes, 0);
        assert_eq!(path.message(), "Same station selected");
    }

    #[test]
    fn totals_are_summed_and_rounded() {
        let path = Path::from_hops(
            station(1, "Mo Chit"),
            station(3, "Asok"),
            vec![hop(1, 2, 1.111, 3), hop(2, 3, 2.222, 4)],
        );

        assert_eq!(
            path.stations,
            vec![StationId(1), StationId(2), StationId(3)]
        );
        assert_eq!(path.total_distance_km, 3.33);
        assert_eq!(path.total_duration_minutes, 7);
        assert_eq!(path.message(), "Route found with 2 segments");
    }

    #[test]
    fn round_km_two_places() {
        assert_eq!(round_km(8.0), 8.0);
        assert_eq!(round_km(0.999), 1.0);
        assert_eq!(round_km(12.3456), 12.35);
    }
}
