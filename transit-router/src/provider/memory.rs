//! In-memory data provider backed by a dataset snapshot.
//!
//! Used by the server binary (loaded from a JSON file at startup) and as
//! the fixture provider throughout the test suite.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Edge, InterchangePoint, Line, LineId, Station, StationId, TransferEdge};

use super::{DataProvider, ProviderError};

/// A complete snapshot of network data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub lines: Vec<Line>,

    #[serde(default)]
    pub stations: Vec<Station>,

    #[serde(default)]
    pub edges: Vec<Edge>,

    #[serde(default)]
    pub transfers: Vec<TransferEdge>,

    #[serde(default)]
    pub interchange_points: Vec<InterchangePoint>,
}

impl Dataset {
    /// Parse a dataset from JSON text. `origin` names the source in errors.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, ProviderError> {
        serde_json::from_str(json).map_err(|source| ProviderError::Json {
            path: origin.to_string(),
            source,
        })
    }

    /// Read and parse a dataset file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json, &path.display().to_string())
    }
}

#[derive(Debug)]
struct Indexed {
    stations: HashMap<StationId, Station>,
    lines: HashMap<LineId, Line>,
    dataset: Dataset,
}

/// Provider serving an immutable [`Dataset`].
///
/// Cheap to clone; clones share the same snapshot.
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    inner: Arc<Indexed>,
}

impl InMemoryProvider {
    /// Index a dataset for lookup.
    pub fn new(dataset: Dataset) -> Self {
        let stations = dataset
            .stations
            .iter()
            .map(|s| (s.id, s.clone()))
            .collect();
        let lines = dataset.lines.iter().map(|l| (l.id, l.clone())).collect();

        Self {
            inner: Arc::new(Indexed {
                stations,
                lines,
                dataset,
            }),
        }
    }

    /// Load a dataset file and index it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        Dataset::from_json_file(path).map(Self::new)
    }

    /// The underlying snapshot.
    pub fn dataset(&self) -> &Dataset {
        &self.inner.dataset
    }
}

impl DataProvider for InMemoryProvider {
    async fn get_station(&self, id: StationId) -> Result<Option<Station>, ProviderError> {
        Ok(self.inner.stations.get(&id).cloned())
    }

    async fn get_stations(
        &self,
        ids: &[StationId],
    ) -> Result<HashMap<StationId, Station>, ProviderError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.inner.stations.get(id).map(|s| (*id, s.clone())))
            .collect())
    }

    async fn get_line(&self, id: LineId) -> Result<Option<Line>, ProviderError> {
        Ok(self.inner.lines.get(&id).cloned())
    }

    async fn list_active_stations(&self) -> Result<Vec<Station>, ProviderError> {
        Ok(self
            .inner
            .dataset
            .stations
            .iter()
            .filter(|s| s.status.is_active())
            .cloned()
            .collect())
    }

    async fn list_active_edges_for_line(&self, line: LineId) -> Result<Vec<Edge>, ProviderError> {
        Ok(self
            .inner
            .dataset
            .edges
            .iter()
            .filter(|e| e.line_id == line && e.status.is_active())
            .cloned()
            .collect())
    }

    async fn list_all_active_edges(&self) -> Result<Vec<Edge>, ProviderError> {
        Ok(self
            .inner
            .dataset
            .edges
            .iter()
            .filter(|e| e.status.is_active())
            .cloned()
            .collect())
    }

    async fn list_active_transfer_edges(&self) -> Result<Vec<TransferEdge>, ProviderError> {
        Ok(self
            .inner
            .dataset
            .transfers
            .iter()
            .filter(|t| t.status.is_active())
            .cloned()
            .collect())
    }

    async fn list_active_lines(&self) -> Result<Vec<Line>, ProviderError> {
        Ok(self
            .inner
            .dataset
            .lines
            .iter()
            .filter(|l| l.status.is_active())
            .cloned()
            .collect())
    }

    async fn count_active_interchange_points(&self) -> Result<usize, ProviderError> {
        Ok(self
            .inner
            .dataset
            .interchange_points
            .iter()
            .filter(|p| p.status.is_active())
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use tempfile::tempdir;

    fn sample() -> Dataset {
        Dataset {
            lines: vec![
                Line::new(LineId(1), "Sukhumvit Line"),
                Line::new(LineId(2), "Closed Line")
                    .with_status(Status::Inactive),
            ],
            stations: vec![
                Station::new(StationId(1), "Mo Chit", LineId(1)),
                Station::new(StationId(2), "Siam", LineId(1)),
                Station::new(StationId(3), "Old Depot", LineId(2))
                    .with_status(Status::Inactive),
            ],
            edges: vec![
                Edge::new(LineId(1), StationId(1), StationId(2), 5.0, 10)
                    .unwrap(),
                Edge::new(LineId(2), StationId(2), StationId(3), 1.0, 2)
                    .unwrap()
                    .with_status(Status::Inactive),
            ],
            transfers: Vec::new(),
            interchange_points: vec![
                InterchangePoint {
                    id: 1,
                    name: "Siam".into(),
                    status: Status::Active,
                },
                InterchangePoint {
                    id: 2,
                    name: "Gone".into(),
                    status: Status::Inactive,
                },
            ],
        }
    }

    #[tokio::test]
    async fn station_lookup_includes_inactive() {
        let provider = InMemoryProvider::new(sample());

        let station = provider.get_station(StationId(3)).await.unwrap();
        assert_eq!(station.map(|s| s.name), Some("Old Depot".to_string()));

        assert!(provider.get_station(StationId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_stations_skips_unknown_ids() {
        let provider = InMemoryProvider::new(sample());

        let found = provider
            .get_stations(&[StationId(1), StationId(2), StationId(42)])
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.contains_key(&StationId(1)));
        assert!(!found.contains_key(&StationId(42)));
    }

    #[tokio::test]
    async fn lists_only_active_rows() {
        let provider = InMemoryProvider::new(sample());

        assert_eq!(provider.list_all_active_edges().await.unwrap().len(), 1);
        let closed_line = provider.list_active_edges_for_line(LineId(2));
        assert!(closed_line.await.unwrap().is_empty());
        assert_eq!(provider.list_active_lines().await.unwrap().len(), 1);
        assert_eq!(provider.list_active_stations().await.unwrap().len(), 2);
        assert_eq!(provider.count_active_interchange_points().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn line_lookup_ignores_status() {
        let provider = InMemoryProvider::new(sample());
        let line = provider.get_line(LineId(2)).await.unwrap().unwrap();
        assert_eq!(line.name, "Closed Line");
    }

    #[tokio::test]
    async fn load_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        let json = serde_json::to_string_pretty(&sample()).unwrap();
        std::fs::write(&path, json).unwrap();

        let provider = InMemoryProvider::from_json_file(&path).unwrap();
        assert_eq!(provider.dataset().stations.len(), 3);
        assert_eq!(provider.list_all_active_edges().await.unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let missing = "/nonexistent/network.json";
        let err = InMemoryProvider::from_json_file(missing).unwrap_err();
        assert!(matches!(err, ProviderError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let json = r#"{ "stations": [ { "id": "x" } ] }"#;
        std::fs::write(&path, json).unwrap();

        let err = Dataset::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ProviderError::Json { .. }));
    }

    #[test]
    fn empty_object_is_empty_dataset() {
        let dataset = Dataset::from_json("{}", "inline").unwrap();
        assert!(dataset.edges.is_empty());
        assert!(dataset.stations.is_empty());
    }

    #[tokio::test]
    async fn bundled_network_loads() {
        let dataset = Dataset::from_json(include_str!("../../data/network.json"), "network.json")
            .unwrap();
        assert_eq!(dataset.lines.len(), 3);
        assert_eq!(dataset.stations.len(), 22);
        assert!(dataset.edges.iter().all(|e| e.check_stored().is_ok()));

        let provider = InMemoryProvider::new(dataset);
        let config = crate::pathfinding::PathConfig::default();
        let finder = crate::pathfinding::PathFinder::new(&provider, &config);

        // Mo Chit to Asok along the Sukhumvit Line
        let path = finder
            .find_shortest_path(StationId(1), StationId(12))
            .await
            .unwrap();
        assert_eq!(path.hops.len(), 11);
        assert_eq!(path.total_distance_km, 10.9);
        assert_eq!(path.total_duration_minutes, 22);
    }
}
