use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;

use crate::api::handlers::{parse_body, ApiError, AppState, ExpandQuery, JsonBody};
use crate::error::{AppError, ReferenceKind};
use crate::logic::{expand_exercise_classes, validate_references};
use crate::model::{
    Entity, Exercise, ExerciseClass, ExercisePatch, ExerciseWithClass, Id, NewExercise,
    UserContext,
};
use crate::store::entity;
use crate::store::traits::{DocumentQuery, DocumentStore};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ExerciseResponse {
    Raw(Exercise),
    WithClass(ExerciseWithClass),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ExerciseListResponse {
    Raw(Vec<Exercise>),
    WithClass(Vec<ExerciseWithClass>),
}

async fn ensure_class_exists<S: DocumentStore>(
    store: &S,
    user: &UserContext,
    class_id: &Id,
) -> Result<(), AppError> {
    validate_references(ReferenceKind::ExerciseClass, std::slice::from_ref(class_id), |id| async move {
        entity::exists::<ExerciseClass, S>(store, user, &id).await
    })
    .await
}

pub async fn create_exercise<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    let request: NewExercise = parse_body(body)?;
    ensure_class_exists(&*store, &user, &request.class_id).await?;

    let exercise: Exercise = entity::insert(&*store, &user, &request)
        .await
        .map_err(AppError::from)?;
    log::info!(
        "Created exercise {} (class {}) for {}",
        exercise.id,
        exercise.class_id,
        user.user_id
    );

    Ok((StatusCode::CREATED, Json(exercise)))
}

pub async fn list_exercises<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Query(query): Query<ExpandQuery>,
) -> Result<Json<ExerciseListResponse>, ApiError> {
    let exercises = entity::list::<Exercise, S>(&*store, &user, &DocumentQuery::newest_first())
        .await
        .map_err(AppError::from)?;

    if !query.includes("class") {
        return Ok(Json(ExerciseListResponse::Raw(exercises)));
    }

    let joined = expand_exercise_classes(&*store, &user, exercises)
        .await
        .map_err(AppError::from)?;
    Ok(Json(ExerciseListResponse::WithClass(joined)))
}

pub async fn get_exercise<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
    Query(query): Query<ExpandQuery>,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let exercise = match entity::find::<Exercise, S>(&*store, &user, &id).await {
        Ok(Some(exercise)) => exercise,
        Ok(None) => return Err(AppError::NotFound(Exercise::LABEL).into()),
        Err(e) => return Err(AppError::from(e).into()),
    };

    if !query.includes("class") {
        return Ok(Json(ExerciseResponse::Raw(exercise)));
    }

    let mut joined = expand_exercise_classes(&*store, &user, vec![exercise])
        .await
        .map_err(AppError::from)?;
    match joined.pop() {
        Some(with_class) => Ok(Json(ExerciseResponse::WithClass(with_class))),
        None => Err(AppError::NotFound(Exercise::LABEL).into()),
    }
}

pub async fn update_exercise<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
    JsonBody(body): JsonBody,
) -> Result<Json<Exercise>, ApiError> {
    let patch: ExercisePatch = parse_body(body)?;

    let existing = entity::exists::<Exercise, S>(&*store, &user, &id)
        .await
        .map_err(AppError::from)?;
    if !existing {
        return Err(AppError::NotFound(Exercise::LABEL).into());
    }

    if let Some(class_id) = &patch.class_id {
        ensure_class_exists(&*store, &user, class_id).await?;
    }

    match entity::update::<Exercise, S, _>(&*store, &user, &id, &patch).await {
        Ok(Some(exercise)) => {
            log::info!("Updated exercise {} for {}", id, user.user_id);
            Ok(Json(exercise))
        }
        Ok(None) => Err(AppError::NotFound(Exercise::LABEL).into()),
        Err(e) => Err(AppError::from(e).into()),
    }
}

pub async fn delete_exercise<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    let removed = entity::remove::<Exercise, S>(&*store, &user, &id)
        .await
        .map_err(AppError::from)?;
    if removed {
        log::info!("Deleted exercise {} for {}", id, user.user_id);
    }
    Ok(StatusCode::NO_CONTENT)
}
