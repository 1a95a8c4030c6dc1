use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{info, warn};

use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;

use axum::{
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{http_cache, log_requests, metrics, state::*, ServerConfig};
use crate::pipeline::{refresh, EtlSnapshot, RefreshOutcome};
use crate::source::{resolve_query, GENRES};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: &'static str,
}

/// Envelope shared by the API endpoints.
#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: false,
        data: None,
        error: Some(message.into()),
    };
    (status, Json(body)).into_response()
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION"),
    };
    Json(stats)
}

async fn get_genres() -> impl IntoResponse {
    Json(GENRES)
}

async fn trigger_etl(State(state): State<ServerState>, Path(term): Path<String>) -> Response {
    let term = term.trim();
    if term.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Search term must not be empty");
    }
    let query = resolve_query(term);

    match refresh(
        state.source.as_ref(),
        &state.snapshots,
        query,
        state.config.page_size,
    )
    .await
    {
        Ok(RefreshOutcome::Published(snapshot)) => {
            let data: &EtlSnapshot = &snapshot;
            Json(ApiResponse::ok(data)).into_response()
        }
        Ok(RefreshOutcome::Superseded(ticket)) => {
            info!("ETL request {} for '{}' was superseded", ticket.seq(), query);
            error_response(StatusCode::CONFLICT, "Superseded by a newer request")
        }
        Err(err) => {
            metrics::record_error("upstream", "etl");
            error_response(StatusCode::BAD_GATEWAY, err.to_string())
        }
    }
}

async fn get_snapshot(State(snapshots): State<GuardedSnapshotStore>) -> Response {
    match snapshots.current() {
        Some(snapshot) => {
            let data: &EtlSnapshot = &snapshot;
            Json(ApiResponse::ok(data)).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "No snapshot available"),
    }
}

fn make_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
}

pub fn make_app(
    config: ServerConfig,
    source: GuardedCatalogSource,
    snapshots: GuardedSnapshotStore,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), source, snapshots);

    let preset_routes: Router = Router::new()
        .route("/genres", get(get_genres))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ));

    let api_routes: Router = Router::new()
        .route("/etl/{term}", get(trigger_etl))
        .route("/snapshot", get(get_snapshot))
        .with_state(state.clone())
        .merge(preset_routes);

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/api", api_routes)
        .layer(make_cors_layer(&config.cors_origins));

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics::metrics_handler))
}

pub async fn run_server(
    config: ServerConfig,
    source: GuardedCatalogSource,
    snapshots: GuardedSnapshotStore,
) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, source, snapshots)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    info!("Serving API on port {}", port);
    info!("Serving metrics on port {}", metrics_port);

    tokio::try_join!(
        async { axum::serve(listener, app).await },
        async { axum::serve(metrics_listener, make_metrics_app()).await },
    )?;
    Ok(())
}
