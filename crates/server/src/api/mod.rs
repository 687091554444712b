//! HTTP routes
//!
//! - `GET /health` - liveness
//! - `POST /api/recommend` - predict a genre
//! - `GET /api/options` - attribute schema

pub mod health;
pub mod options;
pub mod recommend;

use std::any::Any;

use axum::response::{IntoResponse, Response};

pub use health::{health_check, health_routes};
pub use options::get_options;
pub use recommend::recommend;

use crate::error::ApiError;

/// Converts a handler panic into the standard 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(details).into_response()
}
