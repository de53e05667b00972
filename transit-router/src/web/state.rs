//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::CachedProvider;
use crate::export::StationNameFilter;
use crate::pathfinding::PathConfig;
use crate::provider::InMemoryProvider;

/// Shared application state.
///
/// Everything here is read-only; each request builds its own path finder
/// or exporter over the shared provider.
#[derive(Clone)]
pub struct AppState {
    /// Cached network data
    pub provider: Arc<CachedProvider<InMemoryProvider>>,

    /// Path search configuration
    pub path_config: Arc<PathConfig>,

    /// Filter for placeholder station names in graph exports
    pub name_filter: Arc<StationNameFilter>,

    /// Upper bound on a single path search
    pub path_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        provider: CachedProvider<InMemoryProvider>,
        path_config: PathConfig,
        name_filter: StationNameFilter,
        path_timeout: Duration,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            path_config: Arc::new(path_config),
            name_filter: Arc::new(name_filter),
            path_timeout,
        }
    }
}
