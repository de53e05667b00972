//! Caching layer at the data provider boundary.
//!
//! The routing core rebuilds its graph on every request and never caches.
//! Deployments that read from a slow store can wrap their provider in a
//! [`CachedProvider`], which memoises list queries and station lookups for
//! a short TTL. Errors are never cached.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Edge, Line, LineId, Station, StationId, TransferEdge};
use crate::provider::{DataProvider, ProviderError};

/// Which edge listing a cached entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EdgeScope {
    All,
    Line(LineId),
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per query kind.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Create a new configuration.
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        Self { ttl, max_capacity }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

fn build<K, V>(config: &CacheConfig) -> MokaCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

/// Return the cached value for `key`, or run `fetch` and cache its result.
async fn get_or_fetch<K, V, F>(
    cache: &MokaCache<K, V>,
    key: K,
    fetch: F,
) -> Result<V, ProviderError>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    F: Future<Output = Result<V, ProviderError>>,
{
    if let Some(hit) = cache.get(&key).await {
        return Ok(hit);
    }

    let value = fetch.await?;
    cache.insert(key, value.clone()).await;
    Ok(value)
}

/// Data provider with caching.
///
/// Wraps any [`DataProvider`] and is itself a `DataProvider`.
pub struct CachedProvider<P> {
    inner: P,
    stations: MokaCache<StationId, Option<Station>>,
    lines: MokaCache<LineId, Option<Line>>,
    edges: MokaCache<EdgeScope, Arc<Vec<Edge>>>,
    transfers: MokaCache<(), Arc<Vec<TransferEdge>>>,
    active_lines: MokaCache<(), Arc<Vec<Line>>>,
    active_stations: MokaCache<(), Arc<Vec<Station>>>,
    interchange_count: MokaCache<(), usize>,
}

impl<P> CachedProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        Self {
            inner,
            stations: build(config),
            lines: build(config),
            edges: build(config),
            transfers: build(config),
            active_lines: build(config),
            active_stations: build(config),
            interchange_count: build(config),
        }
    }

    /// Access the wrapped provider for reads that bypass the cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
        self.lines.invalidate_all();
        self.edges.invalidate_all();
        self.transfers.invalidate_all();
        self.active_lines.invalidate_all();
        self.active_stations.invalidate_all();
        self.interchange_count.invalidate_all();
    }
}

impl<P: DataProvider + Sync> DataProvider for CachedProvider<P> {
    async fn get_station(&self, id: StationId) -> Result<Option<Station>, ProviderError> {
        let fetch = self.inner.get_station(id);
        get_or_fetch(&self.stations, id, fetch).await
    }

    async fn get_stations(
        &self,
        ids: &[StationId],
    ) -> Result<HashMap<StationId, Station>, ProviderError> {
        let mut found = HashMap::with_capacity(ids.len());
        let mut misses = Vec::new();

        for id in ids {
            match self.stations.get(id).await {
                Some(Some(station)) => {
                    found.insert(*id, station);
                }
                Some(None) => {}
                None => misses.push(*id),
            }
        }
        misses.sort();
        misses.dedup();

        if misses.is_empty() {
            return Ok(found);
        }

        trace!(misses = misses.len(), "station cache miss");
        let mut fetched = self.inner.get_stations(&misses).await?;
        for id in misses {
            let station = fetched.remove(&id);
            self.stations.insert(id, station.clone()).await;
            if let Some(station) = station {
                found.insert(id, station);
            }
        }

        Ok(found)
    }

    async fn get_line(&self, id: LineId) -> Result<Option<Line>, ProviderError> {
        get_or_fetch(&self.lines, id, self.inner.get_line(id)).await
    }

    async fn list_active_stations(&self) -> Result<Vec<Station>, ProviderError> {
        let fetch = async {
            self.inner.list_active_stations().await.map(Arc::new)
        };
        let stations = get_or_fetch(&self.active_stations, (), fetch).await?;
        Ok(stations.as_ref().clone())
    }

    async fn list_active_edges_for_line(&self, line: LineId) -> Result<Vec<Edge>, ProviderError> {
        let fetch = async {
            self.inner
                .list_active_edges_for_line(line)
                .await
                .map(Arc::new)
        };
        let scope = EdgeScope::Line(line);
        let edges = get_or_fetch(&self.edges, scope, fetch).await?;
        Ok(edges.as_ref().clone())
    }

    async fn list_all_active_edges(&self) -> Result<Vec<Edge>, ProviderError> {
        let fetch = async {
            self.inner.list_all_active_edges().await.map(Arc::new)
        };
        let edges = get_or_fetch(&self.edges, EdgeScope::All, fetch).await?;
        Ok(edges.as_ref().clone())
    }

    async fn list_active_transfer_edges(&self) -> Result<Vec<TransferEdge>, ProviderError> {
        let fetch = async {
            self.inner.list_active_transfer_edges().await.map(Arc::new)
        };
        let transfers = get_or_fetch(&self.transfers, (), fetch).await?;
        Ok(transfers.as_ref().clone())
    }

    async fn list_active_lines(&self) -> Result<Vec<Line>, ProviderError> {
        let fetch = async {
            self.inner.list_active_lines().await.map(Arc::new)
        };
        let lines = get_or_fetch(&self.active_lines, (), fetch).await?;
        Ok(lines.as_ref().clone())
    }

    async fn count_active_interchange_points(&self) -> Result<usize, ProviderError> {
        get_or_fetch(
            &self.interchange_count,
            (),
            self.inner.count_active_interchange_points(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::provider::{Dataset, InMemoryProvider};

    /// Provider that counts calls and can be switched into failure mode.
    struct CountingProvider {
        inner: InMemoryProvider,
        calls: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    impl CountingProvider {
        fn new() -> Self {
            let dataset = Dataset {
                lines: vec![Line::new(LineId(1), "Silom Line")],
                stations: vec![
                    Station::new(StationId(1), "National Stadium", LineId(1)),
                    Station::new(StationId(2), "Siam", LineId(1)),
                ],
                edges: vec![
                    Edge::new(LineId(1), StationId(1), StationId(2), 1.0, 2)
                        .unwrap(),
                ],
                ..Dataset::default()
            };
            Self {
                inner: InMemoryProvider::new(dataset),
                calls: AtomicUsize::new(0),
                fail: std::sync::atomic::AtomicBool::new(false),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn tick(&self) -> Result<(), ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(ProviderError::Unavailable("down".into()))
            } else {
                Ok(())
            }
        }
    }

    impl DataProvider for CountingProvider {
        async fn get_station(&self, id: StationId) -> Result<Option<Station>, ProviderError> {
            self.tick()?;
            self.inner.get_station(id).await
        }

        async fn get_stations(
            &self,
            ids: &[StationId],
        ) -> Result<HashMap<StationId, Station>, ProviderError> {
            self.tick()?;
            self.inner.get_stations(ids).await
        }

        async fn get_line(&self, id: LineId) -> Result<Option<Line>, ProviderError> {
            self.tick()?;
            self.inner.get_line(id).await
        }

        async fn list_active_stations(&self) -> Result<Vec<Station>, ProviderError> {
            self.tick()?;
            self.inner.list_active_stations().await
        }

        async fn list_active_edges_for_line(
            &self,
            line: LineId,
        ) -> Result<Vec<Edge>, ProviderError> {
            self.tick()?;
            self.inner.list_active_edges_for_line(line).await
        }

        async fn list_all_active_edges(&self) -> Result<Vec<Edge>, ProviderError> {
            self.tick()?;
            self.inner.list_all_active_edges().await
        }

        async fn list_active_transfer_edges(&self) -> Result<Vec<TransferEdge>, ProviderError> {
            self.tick()?;
            self.inner.list_active_transfer_edges().await
        }

        async fn list_active_lines(&self) -> Result<Vec<Line>, ProviderError> {
            self.tick()?;
            self.inner.list_active_lines().await
        }

        async fn count_active_interchange_points(&self) -> Result<usize, ProviderError> {
            self.tick()?;
            self.inner.count_active_interchange_points().await
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn repeated_edge_listing_hits_cache() {
        let cached = CachedProvider::new(CountingProvider::new(), &CacheConfig::default());

        let first = cached.list_all_active_edges().await.unwrap();
        let second = cached.list_all_active_edges().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn line_and_all_edges_are_separate_entries() {
        let cached = CachedProvider::new(CountingProvider::new(), &CacheConfig::default());

        cached.list_all_active_edges().await.unwrap();
        cached.list_active_edges_for_line(LineId(1)).await.unwrap();
        cached.list_active_edges_for_line(LineId(1)).await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn get_stations_only_fetches_misses() {
        let cached = CachedProvider::new(CountingProvider::new(), &CacheConfig::default());

        cached.get_station(StationId(1)).await.unwrap();
        assert_eq!(cached.inner().calls(), 1);

        let found = cached
            .get_stations(&[StationId(1), StationId(2), StationId(9)])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(cached.inner().calls(), 2);

        // Unknown id 9 is remembered as absent
        let found = cached
            .get_stations(&[StationId(2), StationId(9)])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn duplicate_ids_keep_station_cached() {
        let cached = CachedProvider::new(CountingProvider::new(), &CacheConfig::default());

        let found = cached
            .get_stations(&[StationId(1), StationId(1)])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let station = cached.get_station(StationId(1)).await.unwrap();
        assert_eq!(station.unwrap().name, "National Stadium");

        let found = cached
            .get_stations(&[StationId(1), StationId(2)])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cached = CachedProvider::new(CountingProvider::new(), &CacheConfig::default());

        cached.inner().fail.store(true, Ordering::SeqCst);
        assert!(cached.list_active_lines().await.is_err());

        cached.inner().fail.store(false, Ordering::SeqCst);
        let lines = cached.list_active_lines().await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_all_forces_refetch() {
        let cached = CachedProvider::new(CountingProvider::new(), &CacheConfig::default());

        cached.count_active_interchange_points().await.unwrap();
        cached.invalidate_all();
        cached.count_active_interchange_points().await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }
}
