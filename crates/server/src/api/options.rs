//! Attribute options endpoint

use axum::{Json, extract::State};
use genre_model::AttributeSchema;

use crate::AppState;

/// GET /api/options
///
/// Ranges, mood and setting names clients need to build their inputs.
pub async fn get_options(State(state): State<AppState>) -> Json<AttributeSchema> {
    Json(state.handler.handle_options())
}
