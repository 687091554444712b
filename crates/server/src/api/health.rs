//! Health check endpoint

use axum::{Json, Router, routing::get};

use crate::AppState;
use crate::handler::{HealthResponse, RequestHandler};

/// GET /health
///
/// Constant liveness response; does not consult the model.
pub async fn health_check() -> Json<HealthResponse> {
    Json(RequestHandler::handle_health())
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
