use anyhow::{Context, Result};
use std::future::IntoFuture;
use std::time::Duration;

use tracing::info;

use crate::emotion::{EmotionCategory, EMOTION_TAXONOMY};
use crate::segment_store::{compute_statistics, Segment, SegmentId, SegmentPage, SegmentStatistics};
use tower_http::services::ServeDir;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    middleware,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{
    error::ApiError, log_requests, metrics::metrics_handler, segment_file::get_segment_file,
    state::*, ServerConfig,
};

const WELCOME_MESSAGE: &str = "欢迎使用情感标注系统";
const DOCS_PATH: &str = "/docs";
const SUPPORTED_FORMATS: [&str; 3] = ["wav", "mp3", "m4a"];
const DEFAULT_PAGE_LIMIT: usize = 10;

/// Prefix the API is mounted under when a frontend is served at the root.
const API_PREFIX: &str = "/api";

#[derive(Serialize)]
struct ServiceInfo {
    message: &'static str,
    version: &'static str,
    docs: &'static str,
    supported_formats: [&'static str; 3],
    max_file_size: String,
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: String,
    storage_path: String,
    total_segments: usize,
    uptime: String,
}

#[derive(Serialize)]
struct EmotionsResponse {
    emotions: &'static [EmotionCategory],
}

#[derive(Deserialize, Debug)]
struct PaginationParams {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_page_limit")]
    limit: usize,
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Local time without offset, microsecond precision.
fn now_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

async fn home(State(config): State<ServerConfig>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: WELCOME_MESSAGE,
        version: env!("CARGO_PKG_VERSION"),
        docs: DOCS_PATH,
        supported_formats: SUPPORTED_FORMATS,
        max_file_size: format!("{}MB", config.max_upload_size_mb),
    })
}

async fn health(State(state): State<ServerState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: now_timestamp(),
        storage_path: state.config.storage_path.display().to_string(),
        total_segments: state.segment_store.get_segments_count(),
        uptime: format_uptime(state.start_time.elapsed()),
    })
}

async fn list_segments(
    State(state): State<ServerState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<SegmentPage>, ApiError> {
    let Query(params) = params?;
    let limit = match state.config.max_page_limit {
        Some(max) => params.limit.min(max),
        None => params.limit,
    };

    let page = state.segment_store.list_segments(params.skip, limit)?;
    Ok(Json(page))
}

async fn get_segment(
    State(segment_store): State<GuardedSegmentStore>,
    id: Result<Path<SegmentId>, PathRejection>,
) -> Result<Json<Segment>, ApiError> {
    let Path(id) = id?;
    match segment_store.get_segment(id)? {
        Some(segment) => Ok(Json(segment)),
        None => Err(ApiError::SegmentNotFound(id)),
    }
}

async fn get_emotions() -> Json<EmotionsResponse> {
    Json(EmotionsResponse {
        emotions: &EMOTION_TAXONOMY,
    })
}

async fn get_statistics(
    State(segment_store): State<GuardedSegmentStore>,
) -> Result<Json<SegmentStatistics>, ApiError> {
    let segments = segment_store.get_all_segments()?;
    Ok(Json(compute_statistics(&segments)))
}

async fn route_not_found() -> ApiError {
    ApiError::NoRoute
}

fn make_api_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/audio-segments", get(list_segments))
        .route("/audio-segments/{id}", get(get_segment))
        .route("/audio-segments/{id}/file", get(get_segment_file))
        .route("/emotions", get(get_emotions))
        .route("/statistics", get(get_statistics))
        .fallback(route_not_found)
        .with_state(state)
}

pub fn make_app(config: ServerConfig, segment_store: GuardedSegmentStore) -> Router {
    let state = ServerState::new(config.clone(), segment_store);
    let api_routes = make_api_routes(state);

    let app: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new()
                .nest(API_PREFIX, api_routes)
                .fallback_service(static_files_service)
        }
        None => api_routes,
    };

    app.layer(middleware::from_fn_with_state(
        config.requests_logging_level,
        log_requests,
    ))
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(
    config: ServerConfig,
    segment_store: GuardedSegmentStore,
    metrics_port: u16,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, segment_store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    info!("Ready to serve at port {}!", port);
    info!("Metrics available at port {}!", metrics_port);

    tokio::select! {
        result = axum::serve(listener, app).into_future() => {
            info!("HTTP server stopped: {:?}", result);
            result?;
        },
        result = axum::serve(metrics_listener, make_metrics_app()).into_future() => {
            info!("Metrics server stopped: {:?}", result);
            result?;
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }
    Ok(())
}
