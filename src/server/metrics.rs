use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all OpenSound metrics
const PREFIX: &str = "opensound";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "endpoint", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "endpoint"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Pipeline Metrics
    pub static ref ETL_RUNS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_etl_runs_total"), "Total ETL runs by source and outcome"),
        &["source", "outcome"]
    ).expect("Failed to create etl_runs_total metric");

    pub static ref ETL_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            format!("{PREFIX}_etl_duration_seconds"),
            "Duration of an ETL run, fetch included"
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0])
    ).expect("Failed to create etl_duration_seconds metric");

    pub static ref TRACKS_INGESTED_TOTAL: Counter = Counter::new(
        format!("{PREFIX}_tracks_ingested_total"),
        "Total tracks normalized by successful ETL runs"
    ).expect("Failed to create tracks_ingested_total metric");

    pub static ref SUPERSEDED_RUNS_TOTAL: Counter = Counter::new(
        format!("{PREFIX}_superseded_runs_total"),
        "ETL runs whose result was discarded because a newer run was requested"
    ).expect("Failed to create superseded_runs_total metric");

    pub static ref SNAPSHOT_TRACKS: Gauge = Gauge::new(
        format!("{PREFIX}_snapshot_tracks"),
        "Number of tracks in the currently published snapshot"
    ).expect("Failed to create snapshot_tracks metric");

    // Error Metrics
    pub static ref ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_errors_total"), "Total errors by type and endpoint"),
        &["error_type", "endpoint"]
    ).expect("Failed to create errors_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(ETL_RUNS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(ETL_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(TRACKS_INGESTED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(SUPERSEDED_RUNS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(SNAPSHOT_TRACKS.clone()));
    let _ = REGISTRY.register(Box::new(ERRORS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Collapses a request path into a bounded label value.
pub fn categorize_endpoint(path: &str) -> &'static str {
    if path.starts_with("/api/etl/") {
        "etl"
    } else if path == "/api/snapshot" {
        "snapshot"
    } else if path == "/api/genres" {
        "genres"
    } else if path == "/" {
        "home"
    } else if path.starts_with("/api/") {
        "api_other"
    } else {
        "static"
    }
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let endpoint = categorize_endpoint(path);

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, endpoint])
        .observe(duration.as_secs_f64());
}

/// Record a finished ETL run
pub fn record_etl_run(source: &str, outcome: &str, duration: Duration) {
    ETL_RUNS_TOTAL.with_label_values(&[source, outcome]).inc();
    ETL_DURATION_SECONDS.observe(duration.as_secs_f64());
}

pub fn record_tracks_ingested(count: usize) {
    TRACKS_INGESTED_TOTAL.inc_by(count as f64);
}

pub fn record_superseded_run() {
    SUPERSEDED_RUNS_TOTAL.inc();
}

pub fn set_snapshot_tracks(count: usize) {
    SNAPSHOT_TRACKS.set(count as f64);
}

/// Record an error
pub fn record_error(error_type: &str, endpoint: &str) {
    ERRORS_TOTAL
        .with_label_values(&[error_type, endpoint])
        .inc();
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
