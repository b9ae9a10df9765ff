//! HTTP boundary for SqlQuest.
//!
//! A thin axum layer over the validation pipeline: one validate route, one
//! liveness probe, permissive CORS, per-request tracing. All decisions live
//! in the pipeline; this module only frames requests and maps fatal errors
//! to status codes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::QuestError;
use crate::validator::{QueryValidator, ValidationRequest, ValidationResponse};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The validation pipeline.
    pub validator: Arc<QueryValidator>,
}

impl AppState {
    /// Creates new app state over the given validator.
    pub fn new(validator: Arc<QueryValidator>) -> Self {
        Self { validator }
    }
}

/// Creates the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/validate_query", post(validate_query))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /health` liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy"}))
}

/// `POST /validate_query` — drives the pipeline for one request.
async fn validate_query(
    State(state): State<AppState>,
    Json(request): Json<ValidationRequest>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let response = state.validator.validate(&request).await?;
    Ok(Json(response))
}

/// Error payload returned for fatal pipeline errors.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// Fatal pipeline error as an HTTP response.
///
/// A rejected query is NOT an error here — the pipeline absorbs it into a
/// 200 with `is_correct = false`. Only judge failures and backend transport
/// failures reach this type.
#[derive(Debug)]
pub struct ApiError(QuestError);

impl From<QuestError> for ApiError {
    fn from(err: QuestError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self.0 {
            QuestError::Judge(msg) => format!("Error communicating with AI model: {msg}"),
            QuestError::Execution(msg) => format!("Error executing query: {msg}"),
            other => other.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { detail })).into_response()
    }
}
