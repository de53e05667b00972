//! Read-only access to network data.
//!
//! The routing core never talks to storage directly. Everything it needs
//! comes through [`DataProvider`], so the same engine runs over a database,
//! a JSON snapshot or a test fixture.

mod error;
mod memory;

use std::collections::HashMap;
use std::future::Future;

use crate::domain::{Edge, Line, LineId, Station, StationId, TransferEdge};

pub use error::ProviderError;
pub use memory::{Dataset, InMemoryProvider};

/// Source of stations, lines and edges.
///
/// Every call reads a consistent snapshot and has no side effects. Failures
/// are returned immediately; callers own any retry policy.
pub trait DataProvider {
    /// Look up a single station, active or not.
    fn get_station(
        &self,
        id: StationId,
    ) -> impl Future<Output = Result<Option<Station>, ProviderError>> + Send;

    /// Look up several stations. Unknown ids are absent from the map.
    fn get_stations(
        &self,
        ids: &[StationId],
    ) -> impl Future<Output = Result<HashMap<StationId, Station>, ProviderError>> + Send;

    /// Look up a line by id, active or not.
    fn get_line(&self, id: LineId)
    -> impl Future<Output = Result<Option<Line>, ProviderError>> + Send;

    /// All active stations.
    fn list_active_stations(
        &self,
    ) -> impl Future<Output = Result<Vec<Station>, ProviderError>> + Send;

    /// Active edges owned by one line.
    fn list_active_edges_for_line(
        &self,
        line: LineId,
    ) -> impl Future<Output = Result<Vec<Edge>, ProviderError>> + Send;

    /// Active edges across the whole network.
    fn list_all_active_edges(
        &self,
    ) -> impl Future<Output = Result<Vec<Edge>, ProviderError>> + Send;

    /// Active interchange transfers.
    fn list_active_transfer_edges(
        &self,
    ) -> impl Future<Output = Result<Vec<TransferEdge>, ProviderError>> + Send;

    /// Active lines.
    fn list_active_lines(&self) -> impl Future<Output = Result<Vec<Line>, ProviderError>> + Send;

    /// Number of active interchange points.
    fn count_active_interchange_points(
        &self,
    ) -> impl Future<Output = Result<usize, ProviderError>> + Send;
}
