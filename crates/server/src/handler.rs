//! Request handling independent of the HTTP framework.
//!
//! The axum routes in `api` only extract the body and delegate here, so the
//! validation rules can be tested without spinning up a router.
//!
//! ## Validation order
//! 1. The body must be a JSON object
//! 2. Every field must be present, checked in canonical attribute order
//! 3. Every field must coerce to an integer, checked in the same order

use std::sync::Arc;

use genre_model::{
    ATTRIBUTE_COUNT, Attribute, AttributeSchema, GenreId, ListeningContext, Recommendation,
    Recommender,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// Liveness response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Successful prediction, as sent to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationBody {
    pub genre: &'static str,
    pub genre_id: GenreId,
    /// Integer-coerced inputs
    pub inputs: ListeningContext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub recommendation: RecommendationBody,
}

impl From<Recommendation> for RecommendResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            success: true,
            recommendation: RecommendationBody {
                genre: rec.genre_name(),
                genre_id: rec.genre_id(),
                inputs: rec.inputs,
            },
        }
    }
}

/// Validates requests and delegates to the shared recommender
#[derive(Clone, Debug)]
pub struct RequestHandler {
    recommender: Arc<Recommender>,
}

impl RequestHandler {
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self { recommender }
    }

    /// Validate a raw request body and predict a genre for it.
    pub fn handle_recommend(&self, raw: &Value) -> ApiResult<RecommendResponse> {
        let context = parse_context(raw)?;
        let recommendation = self.recommender.predict(&context)?;
        Ok(recommendation.into())
    }

    pub fn handle_options(&self) -> AttributeSchema {
        self.recommender.describe_options()
    }

    /// Constant; does not touch the model
    pub fn handle_health() -> HealthResponse {
        HealthResponse {
            status: "healthy",
            message: "Service is running",
        }
    }
}

/// Turn a raw JSON body into a listening context.
pub fn parse_context(raw: &Value) -> ApiResult<ListeningContext> {
    let fields = raw.as_object().ok_or_else(|| {
        ApiError::MalformedBody(format!("expected a JSON object, found {}", json_kind(raw)))
    })?;

    for attribute in Attribute::ALL {
        if !fields.contains_key(attribute.field_name()) {
            return Err(ApiError::MissingField(attribute.field_name().to_string()));
        }
    }

    let mut vector = [0i64; ATTRIBUTE_COUNT];
    for attribute in Attribute::ALL {
        vector[attribute.index()] = coerce_field(fields, attribute)?;
    }
    Ok(ListeningContext::from_vector(vector))
}

fn coerce_field(fields: &Map<String, Value>, attribute: Attribute) -> ApiResult<i64> {
    let name = attribute.field_name();
    let value = fields
        .get(name)
        .ok_or_else(|| ApiError::MissingField(name.to_string()))?;
    coerce_integer(name, value)
}

/// Integer coercion for one field.
///
/// - integers as-is
/// - floats truncated toward zero
/// - booleans as 1 / 0
/// - strings holding a decimal integer literal (surrounding whitespace allowed)
pub fn coerce_integer(field: &str, value: &Value) -> ApiResult<i64> {
    let invalid = |reason: String| ApiError::InvalidInput(format!("{}: {}", field, reason));

    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
                Some(float) if float.trunc() >= i64::MIN as f64 && float.trunc() < i64::MAX as f64 => {
                    Ok(float.trunc() as i64)
                }
                _ => Err(invalid(format!("{} is out of range", number))),
            }
        }
        Value::Bool(flag) => Ok(i64::from(*flag)),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(format!("'{}' is not an integer", text))),
        other => Err(invalid(format!("expected a number, found {}", json_kind(other)))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
