//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::error::ScreenerError;
use crate::metrics::Metrics;
use crate::ranker::{ScanReport, TradeRanker};
use crate::tickers::{export_symbols, parse_ticker_table};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub ranker: Arc<TradeRanker>,
    pub latest_scan: Arc<RwLock<Option<ScanReport>>>,
}

impl AppState {
    pub fn new(ranker: Arc<TradeRanker>, metrics: Arc<Metrics>) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            ranker,
            latest_scan: Arc::new(RwLock::new(None)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(e: ScreenerError) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
}

fn not_found(message: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "tradescan"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis() as u64,
            "request failed"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub tickers: Vec<String>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub top_n: Option<usize>,
}

async fn run_scan(
    state: &AppState,
    tickers: &[String],
    top_n: Option<usize>,
) -> Result<ScanReport, ApiError> {
    let top_n = top_n.unwrap_or(state.ranker.config().default_top_n);
    let report = state
        .ranker
        .scan(tickers, top_n)
        .await
        .map_err(bad_request)?;
    *state.latest_scan.write().await = Some(report.clone());
    Ok(report)
}

/// Rank a JSON list of tickers
async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanReport>, ApiError> {
    let report = run_scan(&state, &request.tickers, request.top_n).await?;
    Ok(Json(report))
}

/// Rank the tickers of an uploaded comma-separated table
async fn scan_upload(
    State(state): State<AppState>,
    Query(params): Query<UploadQuery>,
    body: String,
) -> Result<Json<ScanReport>, ApiError> {
    let tickers = parse_ticker_table(&body).map_err(bad_request)?;
    let report = run_scan(&state, &tickers, params.top_n).await?;
    Ok(Json(report))
}

async fn latest_scan(State(state): State<AppState>) -> Result<Json<ScanReport>, ApiError> {
    state
        .latest_scan
        .read()
        .await
        .clone()
        .map(Json)
        .ok_or_else(|| not_found("no scan has run yet"))
}

/// Symbols of the latest scan as a single-column CSV
async fn export_latest(State(state): State<AppState>) -> Result<Response, ApiError> {
    let guard = state.latest_scan.read().await;
    let report = guard.as_ref().ok_or_else(|| not_found("no scan has run yet"))?;
    let body = export_symbols(&report.candidates).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"top_trades.csv\""),
        ],
        body,
    )
        .into_response())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/scan", post(scan))
        .route("/api/scan/upload", post(scan_upload))
        .route("/api/scans/latest", get(latest_scan))
        .route("/api/scans/latest/export", get(export_latest))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    state: AppState,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
