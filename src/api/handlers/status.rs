use crate::{
    types::{AppError, StatusResponse},
    AppState,
};
use axum::{extract::State, Json};

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Server is up", body = String)),
    tag = "status"
)]
pub async fn health_check() -> &'static str {
    "OK"
}

/// Which backing services are configured
#[utoipa::path(
    get,
    path = "/api/status",
    responses((status = 200, description = "Service status", body = StatusResponse)),
    tag = "status"
)]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let database_configured = state.donors.is_configured();

    Json(StatusResponse {
        database_configured,
        assistant_configured: state.assistant.is_configured(),
        demo_mode: !database_configured,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for unknown `/api/*` paths
pub async fn api_not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("No API route for {}", uri.path()))
}
