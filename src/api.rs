//! JSON API
//!
//! - `POST /estimate`: run the pipeline for one address
//! - `GET /status`: state of the most recent submission
//! - `GET /health`: liveness and version

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::EstimatorError;
use crate::models::EstimationResult;
use crate::pipeline::{EstimationPipeline, PipelineState};
use crate::report::{self, Card};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EstimationPipeline>,
    pub state: Arc<watch::Sender<PipelineState>>,
}

impl AppState {
    pub fn new(pipeline: EstimationPipeline) -> Self {
        let (state, _) = watch::channel(PipelineState::Idle);
        Self {
            pipeline: Arc::new(pipeline),
            state: Arc::new(state),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub result: EstimationResult,
    pub cards: Vec<Card>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl EstimatorError {
    fn status_code(&self) -> StatusCode {
        match self {
            EstimatorError::Validation { .. } => StatusCode::BAD_REQUEST,
            EstimatorError::NotFound { .. } => StatusCode::NOT_FOUND,
            EstimatorError::InvalidData { .. } | EstimatorError::Transport(_) => {
                StatusCode::BAD_GATEWAY
            }
            EstimatorError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EstimatorError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::warn!(error = %self, "Estimate failed");
        } else {
            tracing::debug!(error = %self, "Client error");
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/estimate", post(estimate))
        .route("/status", get(status))
        .route("/health", get(health))
        .with_state(state)
}

async fn estimate(
    State(app): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, EstimatorError> {
    let result = app.pipeline.run_tracked(&request.address, &app.state).await?;
    let cards = report::cards(&result);

    Ok(Json(EstimateResponse {
        result,
        cards,
        generated_at: Utc::now(),
    }))
}

async fn status(State(app): State<AppState>) -> Json<PipelineState> {
    Json(app.state.borrow().clone())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}
