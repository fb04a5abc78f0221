use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;

use crate::api::handlers::{parse_body, ApiError, AppState, ExpandQuery, JsonBody};
use crate::error::{AppError, ReferenceKind};
use crate::logic::{expand_workout, normalize_workout_body, validate_references};
use crate::model::{
    Entity, Exercise, ExpandedWorkout, Id, NewWorkout, UserContext, Workout, WorkoutPatch,
};
use crate::store::entity;
use crate::store::traits::{DocumentQuery, DocumentStore};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WorkoutResponse {
    Raw(Workout),
    Expanded(ExpandedWorkout),
}

/// Every plan entry must point at one of the user's exercises
async fn ensure_exercises_exist<S: DocumentStore>(
    store: &S,
    user: &UserContext,
    exercise_ids: &[Id],
) -> Result<(), AppError> {
    validate_references(ReferenceKind::Exercise, exercise_ids, |id| async move {
        entity::exists::<Exercise, S>(store, user, &id).await
    })
    .await
}

pub async fn create_workout<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    let request: NewWorkout = parse_body(normalize_workout_body(&body))?;
    ensure_exercises_exist(&*store, &user, &request.exercise_ids()).await?;

    let workout: Workout = entity::insert(&*store, &user, &request)
        .await
        .map_err(AppError::from)?;
    log::info!(
        "Created workout {} with {} plan item(s) for {}",
        workout.id,
        workout.plan.len(),
        user.user_id
    );

    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn list_workouts<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
) -> Result<Json<Vec<Workout>>, ApiError> {
    let workouts = entity::list::<Workout, S>(&*store, &user, &DocumentQuery::newest_first())
        .await
        .map_err(AppError::from)?;
    Ok(Json(workouts))
}

pub async fn get_workout<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
    Query(query): Query<ExpandQuery>,
) -> Result<Json<WorkoutResponse>, ApiError> {
    let workout = match entity::find::<Workout, S>(&*store, &user, &id).await {
        Ok(Some(workout)) => workout,
        Ok(None) => return Err(AppError::NotFound(Workout::LABEL).into()),
        Err(e) => return Err(AppError::from(e).into()),
    };

    if !query.includes("exercises") {
        return Ok(Json(WorkoutResponse::Raw(workout)));
    }

    let expanded = expand_workout(&*store, &user, workout)
        .await
        .map_err(AppError::from)?;
    Ok(Json(WorkoutResponse::Expanded(expanded)))
}

pub async fn update_workout<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
    JsonBody(body): JsonBody,
) -> Result<Json<Workout>, ApiError> {
    let patch: WorkoutPatch = parse_body(normalize_workout_body(&body))?;

    let existing = entity::exists::<Workout, S>(&*store, &user, &id)
        .await
        .map_err(AppError::from)?;
    if !existing {
        return Err(AppError::NotFound(Workout::LABEL).into());
    }

    if let Some(plan) = &patch.plan {
        let exercise_ids: Vec<Id> = plan.iter().map(|item| item.exercise_id.clone()).collect();
        ensure_exercises_exist(&*store, &user, &exercise_ids).await?;
    }

    match entity::update::<Workout, S, _>(&*store, &user, &id, &patch).await {
        Ok(Some(workout)) => {
            log::info!("Updated workout {} for {}", id, user.user_id);
            Ok(Json(workout))
        }
        Ok(None) => Err(AppError::NotFound(Workout::LABEL).into()),
        Err(e) => Err(AppError::from(e).into()),
    }
}

pub async fn delete_workout<S: DocumentStore>(
    State(store): State<AppState<S>>,
    user: UserContext,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    let removed = entity::remove::<Workout, S>(&*store, &user, &id)
        .await
        .map_err(AppError::from)?;
    if removed {
        log::info!("Deleted workout {} for {}", id, user.user_id);
    }
    Ok(StatusCode::NO_CONTENT)
}
