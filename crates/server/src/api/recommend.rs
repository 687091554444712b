//! Recommendation endpoint

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::handler::RecommendResponse;

/// POST /api/recommend
///
/// The body is taken as raw JSON so that missing and non-numeric fields
/// produce our own error messages rather than a deserializer rejection.
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<RecommendResponse>> {
    let Json(raw) = payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

    let response = state.handler.handle_recommend(&raw)?;
    info!(
        "Recommended {} (id {}) for {:?}",
        response.recommendation.genre,
        response.recommendation.genre_id,
        response.recommendation.inputs.to_vector()
    );

    Ok(Json(response))
}
