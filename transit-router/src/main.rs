use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_router::cache::CachedProvider;
use transit_router::config::ServerConfig;
use transit_router::export::StationNameFilter;
use transit_router::pathfinding::PathConfig;
use transit_router::provider::InMemoryProvider;
use transit_router::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,transit_router=debug")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Load the network (fail fast if unavailable)
    info!(path = %config.data_path.display(), "loading network data");
    let provider = InMemoryProvider::from_json_file(&config.data_path)?;
    let dataset = provider.dataset();
    info!(
        lines = dataset.lines.len(),
        stations = dataset.stations.len(),
        edges = dataset.edges.len(),
        transfers = dataset.transfers.len(),
        "loaded network"
    );

    let provider = CachedProvider::new(provider, &config.cache);
    let name_filter = StationNameFilter::new(&config.coded_name_pattern)?;

    let state = AppState::new(
        provider,
        PathConfig::default(),
        name_filter,
        config.path_timeout,
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Transit router listening on http://{}", config.bind);
    info!("  GET  /health                        - Health check");
    info!("  GET  /distance/calculate            - Shortest route (query)");
    info!("  POST /distance/calculate            - Shortest route (JSON body)");
    info!("  GET  /graph/routes                  - Adjacency list per line");
    info!("  GET  /graph/routes/single           - Adjacency list of one line");
    info!("  GET  /graph/routes/adjacency-list   - Adjacency list only");
    info!("  GET  /graph/routes/metadata         - Graph metadata");
    info!("  GET  /graph/station-names           - Station id to name mapping");

    axum::serve(listener, app).await?;
    Ok(())
}
