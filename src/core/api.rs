//! HTTP API for Solace
//!
//! Endpoints:
//! - POST /turn - Process one user message
//! - GET /locales - Locale catalog
//! - GET /health - Health check

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::core::TurnOrchestrator;
use crate::types::LocaleEntry;

/// App state
pub struct AppState {
    pub orchestrator: Arc<TurnOrchestrator>,
}

/// Process turn request
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub user_id: String,
    pub text: String,
    /// Requested locale code; the default locale when absent
    pub locale: Option<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
    pub turns_processed: u64,
    pub persistence_failures: u64,
}

/// Locale catalog response
#[derive(Debug, Serialize)]
pub struct LocalesResponse {
    pub default: String,
    pub locales: Vec<LocaleEntry>,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create the API router
pub fn create_router(orchestrator: Arc<TurnOrchestrator>) -> Router {
    let state = Arc::new(AppState { orchestrator });

    Router::new()
        .route("/health", get(health))
        .route("/locales", get(locales))
        .route("/turn", post(process_turn))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let orch = &state.orchestrator;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: orch.active_sessions(),
        turns_processed: orch.turns_processed(),
        persistence_failures: orch.persistence_failures(),
    })
}

/// Configured locales
async fn locales(State(state): State<Arc<AppState>>) -> Json<LocalesResponse> {
    let catalog = state.orchestrator.locales();
    Json(LocalesResponse {
        default: catalog.default_locale().code().to_string(),
        locales: catalog.entries(),
    })
}

/// Process one turn
async fn process_turn(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TurnRequest>,
) -> Response {
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "user_id must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let orch = &state.orchestrator;
    let limit = orch.config().max_input_bytes;
    if req.text.len() > limit {
        tracing::warn!(user_id, text_len = req.text.len(), limit, "Turn rejected, text too large");
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: format!("text exceeds {} bytes", limit),
            }),
        )
            .into_response();
    }

    let locale = req
        .locale
        .unwrap_or_else(|| orch.locales().default_locale().code().to_string());
    let response = orch.process_turn(user_id, &req.text, &locale).await;
    Json(response).into_response()
}

/// Run the API server
pub async fn run_server(addr: &str, orchestrator: Arc<TurnOrchestrator>) -> anyhow::Result<()> {
    let sweeper = Arc::clone(&orchestrator);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            sweeper.evict_idle();
        }
    });

    let router = create_router(orchestrator);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Solace API listening");
    println!("Solace API running on {}", addr);
    println!("  POST /turn    - Process a message");
    println!("  GET  /locales - Locale catalog");
    println!("  GET  /health  - Health check");

    axum::serve(listener, router).await?;
    Ok(())
}
