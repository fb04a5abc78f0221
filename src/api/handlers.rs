use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;

pub use crate::error::{ApiError, ErrorResponse};

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

#[derive(Debug, Default, Deserialize)]
pub struct ExpandQuery {
    /// Comma-separated relation names, e.g. `?expand=class`
    pub expand: Option<String>,
}

impl ExpandQuery {
    pub fn includes(&self, relation: &str) -> bool {
        self.expand
            .as_deref()
            .map(|value| value.split(',').any(|part| part.trim() == relation))
            .unwrap_or(false)
    }
}

/// Raw JSON request body.
///
/// Any rejection (malformed JSON, missing or wrong `Content-Type`, oversized
/// body) becomes a 400 with the usual `{error}` payload.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(request, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text()).into()),
        }
    }
}

/// Deserialize a JSON body into a request struct and run its declared checks.
///
/// Both shape errors and constraint violations are client errors.
pub fn parse_body<T>(body: Value) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let request: T = serde_json::from_value(body)?;
    request.validate()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewExerciseClass, NewWorkout};
    use serde_json::json;

    #[test]
    fn test_expand_query_matches_listed_relations() {
        let query = ExpandQuery {
            expand: Some("class, exercises".to_string()),
        };
        assert!(query.includes("class"));
        assert!(query.includes("exercises"));
        assert!(!query.includes("sessions"));
        assert!(!ExpandQuery::default().includes("class"));
    }

    #[test]
    fn test_short_class_name_is_rejected() {
        let result = parse_body::<NewExerciseClass>(json!({"name": "P"}));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_missing_field_is_a_validation_error() {
        let result = parse_body::<NewWorkout>(json!({"plan": []}));
        match result {
            Err(AppError::Validation(message)) => assert!(message.contains("name")),
            other => panic!("expected validation error, got {:?}", other.map(|w| w.name)),
        }
    }

    #[test]
    fn test_nested_plan_items_are_validated() {
        let result = parse_body::<NewWorkout>(json!({
            "name": "Leg Day",
            "plan": [{"exerciseId": "e1", "series": 0}]
        }));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
