//! Adjacency-list export of the network.
//!
//! Produces name-keyed adjacency lists for visualisation and graph study:
//! one per line, one for the whole network, or one per line keyed by line
//! name. Nodes are station display names, so interchange stations that
//! share a name across lines become a single node. Placeholder
//! line-position codes ("N1", "E4") are left out entirely.

mod adjacency;
mod exporter;
mod filter;

pub use adjacency::{AdjacencyBuilder, AdjacencyList, count_connections};
pub use exporter::{
    ExportError, FullGraph, GraphExporter, GraphMetadata, LineGraph, LineGraphMetadata,
};
pub use filter::{DEFAULT_CODED_NAME_PATTERN, StationNameFilter};
