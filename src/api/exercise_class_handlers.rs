use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::api::handlers::{parse_body, ApiError, AppState, JsonBody};
use crate::error::AppError;
use crate::model::{Entity, ExerciseClass, ExerciseClassPatch, Id, NewExerciseClass, UserContext};
use crate::store::entity;
use crate::store::traits::{DocumentQuery, DocumentStore};

pub async fn create_exercise_class<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ExerciseClass>), ApiError> {
    let request: NewExerciseClass = parse_body(body)?;

    let class: ExerciseClass = entity::insert(&*store, &user, &request)
        .await
        .map_err(AppError::from)?;
    log::info!("Created exercise class {} for {}", class.id, user.user_id);

    Ok((StatusCode::CREATED, Json(class)))
}

pub async fn list_exercise_classes<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
) -> Result<Json<Vec<ExerciseClass>>, ApiError> {
    let classes = entity::list::<ExerciseClass, S>(&*store, &user, &DocumentQuery::newest_first())
        .await
        .map_err(AppError::from)?;
    Ok(Json(classes))
}

pub async fn get_exercise_class<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
) -> Result<Json<ExerciseClass>, ApiError> {
    match entity::find::<ExerciseClass, S>(&*store, &user, &id).await {
        Ok(Some(class)) => Ok(Json(class)),
        Ok(None) => Err(AppError::NotFound(ExerciseClass::LABEL).into()),
        Err(e) => Err(AppError::from(e).into()),
    }
}

pub async fn update_exercise_class<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
    JsonBody(body): JsonBody,
) -> Result<Json<ExerciseClass>, ApiError> {
    let patch: ExerciseClassPatch = parse_body(body)?;

    match entity::update::<ExerciseClass, S, _>(&*store, &user, &id, &patch).await {
        Ok(Some(class)) => {
            log::info!("Updated exercise class {} for {}", id, user.user_id);
            Ok(Json(class))
        }
        Ok(None) => Err(AppError::NotFound(ExerciseClass::LABEL).into()),
        Err(e) => Err(AppError::from(e).into()),
    }
}

pub async fn delete_exercise_class<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    let removed = entity::remove::<ExerciseClass, S>(&*store, &user, &id)
        .await
        .map_err(AppError::from)?;
    if removed {
        log::info!("Deleted exercise class {} for {}", id, user.user_id);
    }
    Ok(StatusCode::NO_CONTENT)
}
