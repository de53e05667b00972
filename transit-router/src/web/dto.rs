//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{LineId, StationId};
use crate::pathfinding::{Hop, Path};

/// Request to calculate distance and time between two stations.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DistanceCalculationRequest {
    pub from_station_id: StationId,
    pub to_station_id: StationId,
}

/// One segment of a calculated route.
#[derive(Debug, Serialize)]
pub struct RouteSegmentInfo {
    pub from_station_id: StationId,
    pub to_station_id: StationId,
    pub from_station_name: String,
    pub to_station_name: String,
    pub line_name: String,
    pub distance_km: f64,
    pub duration_minutes: u32,
}

impl From<Hop> for RouteSegmentInfo {
    fn from(hop: Hop) -> Self {
        Self {
            from_station_id: hop.from_id,
            to_station_id: hop.to_id,
            from_station_name: hop.from_name,
            to_station_name: hop.to_name,
            line_name: hop.line_name,
            distance_km: hop.distance_km,
            duration_minutes: hop.duration_minutes,
        }
    }
}

/// Response for a distance calculation.
#[derive(Debug, Serialize)]
pub struct DistanceCalculationResponse {
    pub from_station_id: StationId,
    pub to_station_id: StationId,
    pub from_station_name: String,
    pub to_station_name: String,
    pub total_distance_km: f64,
    pub total_duration_minutes: u32,
    pub route_segments: Vec<RouteSegmentInfo>,
    pub success: bool,
    pub message: Option<String>,
}

impl From<Path> for DistanceCalculationResponse {
    fn from(path: Path) -> Self {
        let message = Some(path.message());
        Self {
            from_station_id: path.from.id,
            to_station_id: path.to.id,
            from_station_name: path.from.name,
            to_station_name: path.to.name,
            total_distance_km: path.total_distance_km,
            total_duration_minutes: path.total_duration_minutes,
            route_segments: path.hops.into_iter().map(RouteSegmentInfo::from).collect(),
            success: true,
            message,
        }
    }
}

/// Query for the multi-line graph endpoints.
#[derive(Debug, Deserialize)]
pub struct GraphQuery {
    /// Include transfer connections between lines (default true)
    #[serde(default = "default_true")]
    pub include_intersections: bool,
}

/// Query for a single line's graph.
#[derive(Debug, Deserialize)]
pub struct SingleLineQuery {
    pub line_id: LineId,
}

/// Query for the bare adjacency list.
#[derive(Debug, Deserialize)]
pub struct AdjacencyListQuery {
    #[serde(default = "default_true")]
    pub include_intersections: bool,

    /// Restrict to one line; transfers are then ignored
    pub line_id: Option<LineId>,
}

/// Station id to name mapping.
#[derive(Debug, Serialize)]
pub struct StationNameMappingResponse {
    pub station_name_mapping: BTreeMap<StationId, String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn default_true() -> bool {
    true
}
