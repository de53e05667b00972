//! Graph export service.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use futures::TryFutureExt;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;

use crate::domain::{LineId, StationId};
use crate::provider::{DataProvider, ProviderError};

use super::adjacency::{AdjacencyBuilder, AdjacencyList, count_connections};
use super::filter::StationNameFilter;

/// Error from graph export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// An edge references a station the provider does not know
    #[error("edge references unknown station {0}")]
    StationNotFound(StationId),

    /// Reading network data failed
    #[error("failed to load network data: {0}")]
    Provider(#[from] ProviderError),
}

/// Summary of a combined network graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphMetadata {
    pub total_nodes: usize,
    pub total_connections: usize,
    pub lines_included: Vec<String>,
    pub intersection_points_count: usize,
    pub generated_at: DateTime<Utc>,
}

/// Summary of a single line's graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineGraphMetadata {
    pub total_nodes: usize,
    pub total_connections: usize,

    /// `None` if the line id does not resolve
    pub line_name: Option<String>,

    pub generated_at: DateTime<Utc>,
}

/// Adjacency list of the whole network with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct FullGraph {
    pub graph: AdjacencyList,
    pub metadata: GraphMetadata,
}

/// Adjacency list of one line with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct LineGraph {
    pub graph: AdjacencyList,
    pub metadata: LineGraphMetadata,
}

/// Builds name-keyed adjacency lists from provider data.
///
/// Like the path finder, an exporter keeps no state between calls.
pub struct GraphExporter<'a, P: DataProvider> {
    provider: &'a P,
    filter: &'a StationNameFilter,
}

impl<'a, P: DataProvider> GraphExporter<'a, P> {
    /// Create a new exporter.
    pub fn new(provider: &'a P, filter: &'a StationNameFilter) -> Self {
        Self { provider, filter }
    }

    /// Graph of one line's active edges. Transfers are not included.
    pub async fn build_line_graph(&self, line: LineId) -> Result<LineGraph, ExportError> {
        let line_info = self.provider.get_line(line).map_err(ExportError::from);
        let (builder, line_info) = futures::try_join!(self.line_builder(line), line_info)?;

        let graph = builder.build();
        let metadata = LineGraphMetadata {
            total_nodes: graph.len(),
            total_connections: count_connections(&graph),
            line_name: line_info.map(|l| l.name),
            generated_at: Utc::now(),
        };

        debug!(
            %line,
            nodes = metadata.total_nodes,
            connections = metadata.total_connections,
            "exported line graph"
        );

        Ok(LineGraph { graph, metadata })
    }

    /// Graph of every active line combined, optionally with transfers.
    pub async fn build_full_graph(
        &self,
        include_transfers: bool,
    ) -> Result<FullGraph, ExportError> {
        let mut pairs: Vec<(StationId, StationId)> = self
            .provider
            .list_all_active_edges()
            .await?
            .iter()
            .map(|e| (e.from, e.to))
            .collect();

        if include_transfers {
            let transfers = self.provider.list_active_transfer_edges().await?;
            let transfer_pairs = transfers.iter().map(|t| (t.from_station, t.to_station));
            pairs.extend(transfer_pairs);
        }

        let names = self.station_names(&pairs).await?;
        let mut builder = AdjacencyBuilder::new();
        for (from, to) in &pairs {
            if let Some((a, b)) = self.real_names(&names, *from, *to)? {
                builder.connect(a, b);
            }
        }

        let graph = builder.build();
        let metadata = self.metadata(&graph).await?;

        debug!(
            include_transfers,
            nodes = metadata.total_nodes,
            connections = metadata.total_connections,
            "exported full graph"
        );

        Ok(FullGraph { graph, metadata })
    }

    /// One graph per active line, keyed by line name.
    ///
    /// Lines with no exportable edges are omitted. With `include_transfers`,
    /// each transfer extends the stations of a line graph that already
    /// contain one of its endpoints; it never adds new stations to a line.
    pub async fn build_graph_by_route(
        &self,
        include_transfers: bool,
    ) -> Result<BTreeMap<String, AdjacencyList>, ExportError> {
        let lines = self.provider.list_active_lines().await?;
        let loads = lines.iter().map(|line| self.line_builder(line.id));
        let builders = try_join_all(loads).await?;

        let mut routes: BTreeMap<String, AdjacencyBuilder> = lines
            .into_iter()
            .zip(builders)
            .filter(|(_, builder)| !builder.is_empty())
            .map(|(line, builder)| (line.name, builder))
            .collect();

        if include_transfers {
            let transfers = self.provider.list_active_transfer_edges().await?;
            let pairs: Vec<(StationId, StationId)> = transfers
                .iter()
                .map(|t| (t.from_station, t.to_station))
                .collect();
            let names = self.station_names(&pairs).await?;

            for (from, to) in &pairs {
                if let Some((a, b)) = self.real_names(&names, *from, *to)? {
                    for builder in routes.values_mut() {
                        builder.extend_existing(a, b);
                    }
                }
            }
        }

        Ok(routes
            .into_iter()
            .map(|(name, builder)| (name, builder.build()))
            .collect())
    }

    /// Metadata describing `graph` and the current network.
    pub async fn metadata(&self, graph: &AdjacencyList) -> Result<GraphMetadata, ExportError> {
        let (lines, intersection_points_count) = futures::try_join!(
            self.provider.list_active_lines(),
            self.provider.count_active_interchange_points()
        )?;

        let mut lines_included: Vec<String> = lines.into_iter().map(|l| l.name).collect();
        lines_included.sort();

        Ok(GraphMetadata {
            total_nodes: graph.len(),
            total_connections: count_connections(graph),
            lines_included,
            intersection_points_count,
            generated_at: Utc::now(),
        })
    }

    /// Id to name of every active station, for debugging exports.
    pub async fn station_name_mapping(&self) -> Result<BTreeMap<StationId, String>, ExportError> {
        Ok(self
            .provider
            .list_active_stations()
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect())
    }

    /// Adjacency of one line's active edges.
    async fn line_builder(&self, line: LineId) -> Result<AdjacencyBuilder, ExportError> {
        let pairs: Vec<(StationId, StationId)> = self
            .provider
            .list_active_edges_for_line(line)
            .await?
            .iter()
            .map(|e| (e.from, e.to))
            .collect();

        let names = self.station_names(&pairs).await?;
        let mut builder = AdjacencyBuilder::new();
        for (from, to) in &pairs {
            if let Some((a, b)) = self.real_names(&names, *from, *to)? {
                builder.connect(a, b);
            }
        }
        Ok(builder)
    }

    /// Resolve the name of every station referenced by `pairs`.
    async fn station_names(
        &self,
        pairs: &[(StationId, StationId)],
    ) -> Result<HashMap<StationId, String>, ExportError> {
        let ids: BTreeSet<StationId> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        let ids: Vec<StationId> = ids.into_iter().collect();

        let stations = self.provider.get_stations(&ids).await?;
        if let Some(missing) = ids.iter().find(|id| !stations.contains_key(id)) {
            return Err(ExportError::StationNotFound(*missing));
        }

        Ok(stations.into_iter().map(|(id, s)| (id, s.name)).collect())
    }

    /// Names of both endpoints if both are real names.
    fn real_names<'n>(
        &self,
        names: &'n HashMap<StationId, String>,
        from: StationId,
        to: StationId,
    ) -> Result<Option<(&'n str, &'n str)>, ExportError> {
        let a = names.get(&from).ok_or(ExportError::StationNotFound(from))?;
        let b = names.get(&to).ok_or(ExportError::StationNotFound(to))?;

        if self.filter.is_real_name(a) && self.filter.is_real_name(b) {
            Ok(Some((a.as_str(), b.as_str())))
        } else {
            Ok(None)
        }
    }
}
