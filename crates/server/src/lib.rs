//! Server crate for the genre recommender.
//!
//! This crate exposes the trained model over JSON/HTTP: request validation
//! lives in `handler`, the axum routes in `api`.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use genre_model::Recommender;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod handler;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use handler::{RecommendResponse, RequestHandler};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub handler: RequestHandler,
}

impl AppState {
    /// Wrap a trained recommender; it is never mutated afterwards
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self {
            handler: RequestHandler::new(recommender),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/recommend", post(api::recommend))
        .route("/api/options", get(api::get_options))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(api::handle_panic))
        // Any origin may call the API
        .layer(CorsLayer::permissive())
}
