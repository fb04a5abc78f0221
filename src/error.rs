use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use thiserror::Error;

use crate::model::Id;

/// What a missing reference pointed at; selects the client-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Exercise,
    ExerciseClass,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", missing_references_message(.kind, .ids))]
    MissingReferences { kind: ReferenceKind, ids: Vec<Id> },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid or missing API key")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

fn missing_references_message(kind: &ReferenceKind, ids: &[Id]) -> String {
    match kind {
        ReferenceKind::Exercise => format!("exerciseIds inexistentes: {}", ids.join(", ")),
        ReferenceKind::ExerciseClass => "classId inexistente".to_string(),
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MissingReferences { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Validation(error.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        let status = error.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {:#}", error);
            return (status, Json(ErrorResponse::new("Internal server error")));
        }
        (status, Json(ErrorResponse::new(&error.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_exercises_message_lists_ids() {
        let error = AppError::MissingReferences {
            kind: ReferenceKind::Exercise,
            ids: vec!["x".to_string(), "z".to_string()],
        };
        assert_eq!(error.to_string(), "exerciseIds inexistentes: x, z");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_class_message() {
        let error = AppError::MissingReferences {
            kind: ReferenceKind::ExerciseClass,
            ids: vec!["c1".to_string()],
        };
        assert_eq!(error.to_string(), "classId inexistente");
    }

    #[test]
    fn test_store_errors_map_to_generic_500() {
        let (status, Json(body)) = ApiError::from(AppError::Store(
            anyhow::anyhow!("connection reset").context("Failed to fetch workouts document"),
        ));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
    }

    #[test]
    fn test_not_found_message() {
        let (status, Json(body)) = ApiError::from(AppError::NotFound("Workout"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Workout not found");
    }
}
