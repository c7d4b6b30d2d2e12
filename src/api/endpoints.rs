//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the comparison service:
//! running a prompt against both providers, listing and clearing the stored
//! history, and health checks.

use crate::core::comparator::{Comparator, CredentialOverrides};
use crate::core::config::Config;
use crate::core::constants::{COMPARISON_FAILED_ERROR, MAX_PROMPT_CHARS};
use crate::core::history::HistoryStore;
use crate::models::comparison::{ComparisonRecord, Provider, ProviderResult};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub comparator: Arc<Comparator>,
    pub history: Arc<HistoryStore>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            "/v1/comparisons",
            get(list_comparisons)
                .post(create_comparison)
                .delete(clear_comparisons),
        )
        .route("/health", get(health_check))
        .with_state(state)
}

/// Request body for POST /v1/comparisons
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateComparisonRequest {
    prompt: String,
    /// Optional per-request key, overriding the configured one
    #[serde(default)]
    openai_api_key: Option<String>,
    #[serde(default)]
    google_api_key: Option<String>,
}

/// POST /v1/comparisons - Run one prompt against both providers
async fn create_comparison(
    State(state): State<AppState>,
    Json(request): Json<CreateComparisonRequest>,
) -> Response {
    let prompt_chars = request.prompt.chars().count();

    if request.prompt.trim().is_empty() {
        return bad_request("Prompt must not be empty");
    }
    if prompt_chars > MAX_PROMPT_CHARS {
        return bad_request(&format!(
            "Prompt exceeds the maximum length of {} characters",
            MAX_PROMPT_CHARS
        ));
    }

    tracing::info!("📥 Incoming comparison request: {} chars", prompt_chars);
    debug!("Full prompt: {:?}", request.prompt);

    let overrides = CredentialOverrides {
        openai_api_key: request.openai_api_key,
        google_api_key: request.google_api_key,
    };

    match state.comparator.compare(&request.prompt, &overrides).await {
        Ok(record) => {
            state.history.record(record.clone()).await;
            Json(record).into_response()
        }
        Err(e) => {
            // The comparison mechanism itself failed; both panels report a
            // generic error and nothing is recorded to history.
            error!("Comparison failed to settle: {}", e);
            Json(failed_comparison(&request.prompt)).into_response()
        }
    }
}

/// GET /v1/comparisons - Stored history, newest first
async fn list_comparisons(State(state): State<AppState>) -> impl IntoResponse {
    let comparisons = state.history.list().await;
    Json(json!({
        "count": comparisons.len(),
        "comparisons": comparisons,
    }))
}

/// DELETE /v1/comparisons - Clear the stored history
async fn clear_comparisons(State(state): State<AppState>) -> StatusCode {
    state.history.clear().await;
    StatusCode::NO_CONTENT
}

/// GET / - Root endpoint
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": format!("LLM Compare v{}", env!("CARGO_PKG_VERSION")),
        "status": "running",
        "config": {
            "openai_api_url": state.config.openai_api_url,
            "gemini_api_url": state.config.gemini_api_url,
            "openai_key_configured": !state.config.openai_api_key.is_empty(),
            "google_key_configured": !state.config.google_api_key.is_empty(),
            "request_timeout": state.config.request_timeout,
            "history_size": state.history.len().await,
        },
        "endpoints": {
            "comparisons": "/v1/comparisons",
            "health": "/health",
        },
    }))
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "openai_key_configured": !state.config.openai_api_key.is_empty(),
        "google_key_configured": !state.config.google_api_key.is_empty(),
    }))
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Degraded record returned when the comparison mechanism faults: both
/// panels carry the same generic error with zero latency
fn failed_comparison(prompt: &str) -> ComparisonRecord {
    let [chatgpt, gemini] = Provider::ALL.map(|provider| {
        ProviderResult::failure(provider, COMPARISON_FAILED_ERROR.to_string(), 0)
    });
    ComparisonRecord::new(prompt, chatgpt, gemini)
}
