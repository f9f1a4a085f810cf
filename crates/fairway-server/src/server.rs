//! Axum server wiring for the Fairway API.
//!
//! Routes:
//! - `POST /api/rounds` stores a submitted round
//! - `GET /api/handicap` returns the current handicap index
//! - `GET /api/status` reports operational counters
//! - `GET /health` liveness probe

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use fairway_core::{Error, HandicapService, NewRound, Result, RoundStore};

/// Origin allowed to call the API when none is configured.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    pub addr: SocketAddr,
    /// Origin allowed to make cross-site requests, or `None` to
    /// disable CORS.
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_origin: Some(DEFAULT_CORS_ORIGIN.to_string()),
        }
    }
}

impl ServerConfig {
    /// Create a builder for server configuration.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    cors_origin: Option<Option<String>>,
}

impl ServerConfigBuilder {
    /// Set the bind address.
    #[must_use]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    /// Set the allowed cross-site origin, or `None` to disable CORS.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: Option<String>) -> Self {
        self.cors_origin = Some(origin);
        self
    }

    /// Build the configuration, filling unset fields with defaults.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            addr: self.addr.unwrap_or(defaults.addr),
            cors_origin: self.cors_origin.unwrap_or(defaults.cors_origin),
        }
    }
}

/// Shared state handed to every request handler.
pub struct AppState {
    service: HandicapService,
    started_at: Instant,
    rounds_submitted: AtomicU64,
    handicap_reads: AtomicU64,
}

impl AppState {
    /// Create request state over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RoundStore>) -> Self {
        Self {
            service: HandicapService::new(store),
            started_at: Instant::now(),
            rounds_submitted: AtomicU64::new(0),
            handicap_reads: AtomicU64::new(0),
        }
    }
}

/// HTTP server for the Fairway API.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Create a server with the given configuration and store.
    #[must_use]
    pub fn new(config: ServerConfig, store: Arc<dyn RoundStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(store)),
        }
    }

    /// Run the server until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let app = router(self.state, self.config.cors_origin.as_deref())?;

        tracing::info!(addr = %self.config.addr, "Starting Fairway server");
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}

/// Build the API router over the given state.
///
/// `cors_origin` is the single origin allowed to make cross-site
/// requests; `None` disables CORS entirely.
pub fn router(state: Arc<AppState>, cors_origin: Option<&str>) -> Result<Router> {
    let mut app = Router::new()
        .route("/api/rounds", post(submit_round))
        .route("/api/handicap", get(get_handicap))
        .route("/api/status", get(server_status))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = cors_origin {
        let allowed = HeaderValue::from_str(origin)
            .map_err(|_| Error::config(format!("invalid CORS origin: {origin}")))?;
        let cors = CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);
        app = app.layer(cors);
    }

    Ok(app)
}

async fn health() -> &'static str {
    "OK"
}

async fn submit_round(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<NewRound>,
) -> Response {
    let request_id = Uuid::new_v4();
    tracing::debug!(%request_id, score = submission.score, "Round submission received");

    match state.service.submit_round(submission).await {
        Ok(round) => {
            state.rounds_submitted.fetch_add(1, Ordering::Relaxed);
            tracing::info!(%request_id, id = %round.id, "Round stored");
            Json(round).into_response()
        }
        Err(err) => {
            tracing::warn!(%request_id, error = %err, "Round submission failed");
            error_to_response(&err)
        }
    }
}

async fn get_handicap(State(state): State<Arc<AppState>>) -> Response {
    match state.service.handicap().await {
        Ok(index) => {
            state.handicap_reads.fetch_add(1, Ordering::Relaxed);
            Json(index).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Handicap lookup failed");
            error_to_response(&err)
        }
    }
}

async fn server_status(State(state): State<Arc<AppState>>) -> Response {
    let rounds = match state.service.round_count().await {
        Ok(count) => count,
        Err(err) => {
            tracing::error!(error = %err, "Status read failed");
            return error_to_response(&err);
        }
    };
    let last_played_at = match state.service.most_recent_round().await {
        Ok(round) => round.map(|r| r.played_at),
        Err(err) => {
            tracing::error!(error = %err, "Status read failed");
            return error_to_response(&err);
        }
    };

    Json(ServerStatus {
        status: "ok",
        uptime_seconds: state.started_at.elapsed().as_secs(),
        rounds,
        last_played_at,
        rounds_submitted: state.rounds_submitted.load(Ordering::Relaxed),
        handicap_reads: state.handicap_reads.load(Ordering::Relaxed),
    })
    .into_response()
}

fn error_to_response(err: &Error) -> Response {
    let (status, error_type) = if err.is_validation() {
        (StatusCode::BAD_REQUEST, "invalid_request_error")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
    };
    error_response(status, &err.to_string(), error_type)
}

fn error_response(status: StatusCode, message: &str, error_type: &str) -> Response {
    let body = ErrorResponse {
        error: ErrorDetail {
            message: message.to_string(),
            error_type: error_type.to_string(),
            code: None,
        },
    };
    (status, Json(body)).into_response()
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
    code: Option<String>,
}

#[derive(Debug, Serialize)]
struct ServerStatus {
    status: &'static str,
    uptime_seconds: u64,
    rounds: usize,
    last_played_at: Option<DateTime<Utc>>,
    rounds_submitted: u64,
    handicap_reads: u64,
}
