//! HTTP route handlers.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::export::{AdjacencyList, ExportError, GraphExporter, GraphMetadata};
use crate::pathfinding::{Path, PathError, PathFinder};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/distance/calculate",
            get(calculate_distance_query).post(calculate_distance_body),
        )
        .route("/graph/routes", get(routes_graph))
        .route("/graph/routes/single", get(single_route_graph))
        .route("/graph/routes/adjacency-list", get(adjacency_list))
        .route("/graph/routes/metadata", get(graph_metadata))
        .route("/graph/station-names", get(station_names))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Shortest route between two stations, ids in the query string.
async fn calculate_distance_query(
    State(state): State<AppState>,
    Query(req): Query<DistanceCalculationRequest>,
) -> Result<Json<DistanceCalculationResponse>, AppError> {
    calculate_distance(&state, req).await
}

/// Shortest route between two stations, ids in a JSON body.
async fn calculate_distance_body(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DistanceCalculationResponse>, AppError> {
    // Parse manually so the body can be logged on failure
    let req: DistanceCalculationRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid distance request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    calculate_distance(&state, req).await
}

async fn calculate_distance(
    state: &AppState,
    req: DistanceCalculationRequest,
) -> Result<Json<DistanceCalculationResponse>, AppError> {
    let finder = PathFinder::new(state.provider.as_ref(), state.path_config.as_ref());
    let path = bounded(
        state.path_timeout,
        finder.find_shortest_path(req.from_station_id, req.to_station_id),
    )
    .await?;

    Ok(Json(DistanceCalculationResponse::from(path)))
}

/// Run a path search, giving up after `limit`.
///
/// The search yields periodically, so dropping it on timeout stops the work.
async fn bounded<F>(limit: Duration, search: F) -> Result<Path, AppError>
where
    F: Future<Output = Result<Path, PathError>>,
{
    match tokio::time::timeout(limit, search).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::Timeout {
            message: format!("Route search exceeded {} ms", limit.as_millis()),
        }),
    }
}

/// One adjacency list per line, keyed by line name.
async fn routes_graph(
    State(state): State<AppState>,
    Query(query): Query<GraphQuery>,
) -> Result<Json<BTreeMap<String, AdjacencyList>>, AppError> {
    let exporter = GraphExporter::new(state.provider.as_ref(), state.name_filter.as_ref());
    let routes = exporter
        .build_graph_by_route(query.include_intersections)
        .await?;
    Ok(Json(routes))
}

/// Adjacency list of a single line.
async fn single_route_graph(
    State(state): State<AppState>,
    Query(query): Query<SingleLineQuery>,
) -> Result<Json<AdjacencyList>, AppError> {
    let exporter = GraphExporter::new(state.provider.as_ref(), state.name_filter.as_ref());
    let line = exporter.build_line_graph(query.line_id).await?;
    Ok(Json(line.graph))
}

/// Bare adjacency list of one line or of the whole network.
async fn adjacency_list(
    State(state): State<AppState>,
    Query(query): Query<AdjacencyListQuery>,
) -> Result<Json<AdjacencyList>, AppError> {
    let exporter = GraphExporter::new(state.provider.as_ref(), state.name_filter.as_ref());
    let graph = match query.line_id {
        Some(line) => exporter.build_line_graph(line).await?.graph,
        None => {
            exporter
                .build_full_graph(query.include_intersections)
                .await?
                .graph
        }
    };
    Ok(Json(graph))
}

/// Metadata of the whole-network graph.
async fn graph_metadata(
    State(state): State<AppState>,
    Query(query): Query<GraphQuery>,
) -> Result<Json<GraphMetadata>, AppError> {
    let exporter = GraphExporter::new(state.provider.as_ref(), state.name_filter.as_ref());
    let full = exporter
        .build_full_graph(query.include_intersections)
        .await?;
    Ok(Json(full.metadata))
}

/// Id to name of every active station.
async fn station_names(
    State(state): State<AppState>,
) -> Result<Json<StationNameMappingResponse>, AppError> {
    let exporter = GraphExporter::new(state.provider.as_ref(), state.name_filter.as_ref());
    let station_name_mapping = exporter.station_name_mapping().await?;
    Ok(Json(StationNameMappingResponse {
        station_name_mapping,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
    Timeout { message: String },
}

impl From<PathError> for AppError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::StationNotFound { .. }
            | PathError::NoRoutesAvailable
            | PathError::NoPathFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            PathError::InvalidEdge(_) | PathError::Provider(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Internal {
            message: format!("Error generating graph: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
