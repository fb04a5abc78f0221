use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::api::handlers::{parse_body, ApiError, AppState, JsonBody};
use crate::error::AppError;
use crate::model::{Entity, Id, NewSession, Session, SessionDate, SessionPatch, UserContext};
use crate::store::entity;
use crate::store::traits::{DocumentQuery, DocumentStore, FieldRange};

#[derive(Debug, Default, Deserialize)]
pub struct SessionRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SessionRangeQuery {
    /// Sessions newest first by `date`, bounded inclusively by `from`/`to`
    pub fn to_document_query(&self) -> Result<DocumentQuery, AppError> {
        let bound = |raw: &Option<String>| -> Result<Option<SessionDate>, AppError> {
            raw.as_deref()
                .filter(|value| !value.trim().is_empty())
                .map(|value| SessionDate::parse(value).map_err(AppError::Validation))
                .transpose()
        };

        let query = DocumentQuery::descending_by("date");
        let from = bound(&self.from)?.map(|date| date.as_str().to_string());
        let to = bound(&self.to)?.map(|date| date.upper_bound());
        if from.is_none() && to.is_none() {
            return Ok(query);
        }
        Ok(query.with_range(FieldRange {
            field: "date".to_string(),
            from,
            to,
        }))
    }
}

pub async fn create_session<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let request: NewSession = parse_body(body)?;
    // entries[].exerciseId and workoutId are stored as given, without existence checks

    let session: Session = entity::insert(&*store, &user, &request)
        .await
        .map_err(AppError::from)?;
    log::info!(
        "Created session {} on {} for {}",
        session.id,
        session.date.as_str(),
        user.user_id
    );

    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn list_sessions<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Query(range): Query<SessionRangeQuery>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let query = range.to_document_query()?;
    let sessions = entity::list::<Session, S>(&*store, &user, &query)
        .await
        .map_err(AppError::from)?;
    Ok(Json(sessions))
}

pub async fn get_session<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
) -> Result<Json<Session>, ApiError> {
    match entity::find::<Session, S>(&*store, &user, &id).await {
        Ok(Some(session)) => Ok(Json(session)),
        Ok(None) => Err(AppError::NotFound(Session::LABEL).into()),
        Err(e) => Err(AppError::from(e).into()),
    }
}

pub async fn update_session<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
    JsonBody(body): JsonBody,
) -> Result<Json<Session>, ApiError> {
    let patch: SessionPatch = parse_body(body)?;

    match entity::update::<Session, S, _>(&*store, &user, &id, &patch).await {
        Ok(Some(session)) => {
            log::info!("Updated session {} for {}", id, user.user_id);
            Ok(Json(session))
        }
        Ok(None) => Err(AppError::NotFound(Session::LABEL).into()),
        Err(e) => Err(AppError::from(e).into()),
    }
}

pub async fn delete_session<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    let removed = entity::remove::<Session, S>(&*store, &user, &id)
        .await
        .map_err(AppError::from)?;
    if removed {
        log::info!("Deleted session {} for {}", id, user.user_id);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::traits::OrderBy;

    #[test]
    fn test_no_bounds_means_no_range() {
        let query = SessionRangeQuery::default().to_document_query().unwrap();
        assert_eq!(query.order_by, OrderBy::Field("date".to_string()));
        assert!(query.descending);
        assert!(query.range.is_none());
    }

    #[test]
    fn test_bounds_are_carried_into_the_range() {
        let query = SessionRangeQuery {
            from: Some("2024-03-01".to_string()),
            to: None,
        }
        .to_document_query()
        .unwrap();
        let range = query.range.unwrap();
        assert_eq!(range.from.as_deref(), Some("2024-03-01"));
        assert!(range.to.is_none());
    }

    #[test]
    fn test_calendar_upper_bound_reaches_end_of_day() {
        let query = SessionRangeQuery {
            from: Some("2024-03-18".to_string()),
            to: Some("2024-03-18".to_string()),
        }
        .to_document_query()
        .unwrap();
        let range = query.range.unwrap();
        assert!(range.contains(Some("2024-03-18")));
        assert!(range.contains(Some("2024-03-18T07:30:00.000Z")));
        assert!(!range.contains(Some("2024-03-19T00:00:00.000Z")));
    }

    #[test]
    fn test_malformed_bound_is_rejected() {
        let result = SessionRangeQuery {
            from: Some("march".to_string()),
            to: None,
        }
        .to_document_query();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
