//! Shortest-path search between two stations.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::domain::{InvalidEdge, LineId, Station, StationId};
use crate::provider::{DataProvider, ProviderError};

use super::config::PathConfig;
use super::graph::RouteGraph;
use super::path::{Hop, Path, StationRef, UNKNOWN_LINE};

/// Which station of a request could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationRole {
    Origin,
    Destination,
    /// A station on the computed path that is missing from the provider
    Intermediate,
}

impl fmt::Display for StationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StationRole::Origin => "from",
            StationRole::Destination => "to",
            StationRole::Intermediate => "intermediate",
        })
    }
}

/// Error from shortest-path search.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// A station id did not resolve
    #[error("{role} station with ID {id} not found")]
    StationNotFound { role: StationRole, id: StationId },

    /// The network has no active edges at all
    #[error("no active routes found in the system")]
    NoRoutesAvailable,

    /// Origin and destination are in disconnected components
    #[error("no route found between stations {from} and {to}")]
    NoPathFound { from: StationId, to: StationId },

    /// A stored edge cannot be used for routing
    #[error("invalid network data: {0}")]
    InvalidEdge(#[from] InvalidEdge),

    /// Reading network data failed
    #[error("failed to load network data: {0}")]
    Provider(#[from] ProviderError),
}

/// Shortest-path engine.
///
/// Holds no state of its own; every search reads a fresh snapshot from
/// the provider and builds a private graph.
pub struct PathFinder<'a, P: DataProvider> {
    provider: &'a P,
    config: &'a PathConfig,
}

impl<'a, P: DataProvider> PathFinder<'a, P> {
    /// Create a new path finder.
    pub fn new(provider: &'a P, config: &'a PathConfig) -> Self {
        Self { provider, config }
    }

    /// Find the shortest path by distance from `from` to `to`.
    ///
    /// The result is all-or-nothing: either a complete path or an error.
    pub async fn find_shortest_path(
        &self,
        from: StationId,
        to: StationId,
    ) -> Result<Path, PathError> {
        let endpoints = self.provider.get_stations(&[from, to]).await?;
        let origin = endpoints.get(&from).ok_or(PathError::StationNotFound {
            role: StationRole::Origin,
            id: from,
        })?;
        let destination = endpoints.get(&to).ok_or(PathError::StationNotFound {
            role: StationRole::Destination,
            id: to,
        })?;

        if from == to {
            return Ok(Path::same_station(station_ref(origin)));
        }

        let edges = self.provider.list_all_active_edges().await?;
        if edges.is_empty() {
            return Err(PathError::NoRoutesAvailable);
        }

        let graph = RouteGraph::build(&edges, self.config)?;
        let stations = graph
            .shortest_path(from, to, self.config.yield_every)
            .await
            .ok_or(PathError::NoPathFound { from, to })?;

        let hops = self.label_hops(&graph, &stations).await?;
        let path = Path::from_hops(station_ref(origin), station_ref(destination), hops);

        debug!(
            %from,
            %to,
            hops = path.hops.len(),
            distance_km = path.total_distance_km,
            duration_minutes = path.total_duration_minutes,
            "shortest path found"
        );

        Ok(path)
    }

    /// Attach station and line names to each consecutive pair of `stations`.
    async fn label_hops(
        &self,
        graph: &RouteGraph,
        stations: &[StationId],
    ) -> Result<Vec<Hop>, PathError> {
        let known = self.provider.get_stations(stations).await?;
        let mut line_names: HashMap<LineId, String> = HashMap::new();
        let mut hops = Vec::with_capacity(stations.len().saturating_sub(1));

        for pair in stations.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let link = graph
                .hop(from, to)
                .ok_or(PathError::NoPathFound { from, to })?;

            let line_name = match line_names.get(&link.line_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self
                        .provider
                        .get_line(link.line_id)
                        .await?
                        .map(|line| line.name)
                        .unwrap_or_else(|| UNKNOWN_LINE.to_string());
                    line_names.insert(link.line_id, name.clone());
                    name
                }
            };

            hops.push(Hop {
                from_id: from,
                to_id: to,
                from_name: name_of(&known, from)?,
                to_name: name_of(&known, to)?,
                line_name,
                distance_km: link.distance_km,
                duration_minutes: link.duration_minutes,
            });
        }

        Ok(hops)
    }
}

fn station_ref(station: &Station) -> StationRef {
    StationRef {
        id: station.id,
        name: station.name.clone(),
    }
}

fn name_of(known: &HashMap<StationId, Station>, id: StationId) -> Result<String, PathError> {
    known
        .get(&id)
        .map(|s| s.name.clone())
        .ok_or(PathError::StationNotFound {
            role: StationRole::Intermediate,
            id,
        })
}
