use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::application::RuntimeService;
use crate::domain::{Container, Dashboard, Image};
use crate::ports::{CallContext, RuntimeError};

/// Provider error rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct AppError(RuntimeError);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0 {
            RuntimeError::Validation(_) => StatusCode::BAD_REQUEST,
            RuntimeError::NotFound(_) => StatusCode::NOT_FOUND,
            RuntimeError::Invocation { .. } | RuntimeError::Parse { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

impl From<RuntimeError> for AppError {
    fn from(err: RuntimeError) -> Self {
        AppError(err)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub runtime_service: RuntimeService,
    pub request_timeout: Duration,
}

impl AppState {
    /// Fresh context per request; dropping the request future kills any
    /// engine process it started.
    fn call_context(&self) -> CallContext {
        CallContext::with_timeout(self.request_timeout)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
}

/// Handler for GET /api/v1/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.runtime_service.backend(),
    })
}

/// Handler for GET /api/v1/dashboard
pub async fn dashboard_handler(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    let dashboard = state.runtime_service.dashboard(&state.call_context()).await?;
    Ok(Json(dashboard))
}

/// Handler for GET /api/v1/containers
pub async fn containers_handler(State(state): State<AppState>) -> Result<Json<Vec<Container>>, AppError> {
    let containers = state.runtime_service.list_containers(&state.call_context()).await?;
    Ok(Json(containers))
}

/// Handler for GET /api/v1/images
pub async fn images_handler(State(state): State<AppState>) -> Result<Json<Vec<Image>>, AppError> {
    let images = state.runtime_service.list_images(&state.call_context()).await?;
    Ok(Json(images))
}

/// Handler for POST /api/v1/containers/{id}/start
pub async fn start_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    state.runtime_service.start_container(&state.call_context(), &id).await?;
    Ok(Json(StatusResponse { status: "started" }))
}

/// Handler for POST /api/v1/containers/{id}/stop
pub async fn stop_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    state.runtime_service.stop_container(&state.call_context(), &id).await?;
    Ok(Json(StatusResponse { status: "stopped" }))
}

/// Handler for POST /api/v1/containers/{id}/restart
pub async fn restart_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    state.runtime_service.restart_container(&state.call_context(), &id).await?;
    Ok(Json(StatusResponse { status: "restarted" }))
}
