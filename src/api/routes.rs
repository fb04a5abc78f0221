use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::api::api_key::{require_api_key, ApiKeyGate};
use crate::api::{
    exercise_class_handlers, exercise_handlers, handlers, session_handlers, workout_handlers,
};
use crate::store::traits::DocumentStore;

pub fn create_router<S: DocumentStore + 'static>(gate: ApiKeyGate) -> Router<Arc<S>> {
    let resources = Router::new()
        // Exercise classes
        .route(
            "/exercise-classes",
            get(exercise_class_handlers::list_exercise_classes::<S>)
                .post(exercise_class_handlers::create_exercise_class::<S>),
        )
        .route(
            "/exercise-classes/:id",
            get(exercise_class_handlers::get_exercise_class::<S>)
                .patch(exercise_class_handlers::update_exercise_class::<S>)
                .delete(exercise_class_handlers::delete_exercise_class::<S>),
        )
        // Exercises
        .route(
            "/exercises",
            get(exercise_handlers::list_exercises::<S>).post(exercise_handlers::create_exercise::<S>),
        )
        .route(
            "/exercises/:id",
            get(exercise_handlers::get_exercise::<S>)
                .patch(exercise_handlers::update_exercise::<S>)
                .delete(exercise_handlers::delete_exercise::<S>),
        )
        // Workouts
        .route(
            "/workouts",
            get(workout_handlers::list_workouts::<S>).post(workout_handlers::create_workout::<S>),
        )
        .route(
            "/workouts/:id",
            get(workout_handlers::get_workout::<S>)
                .patch(workout_handlers::update_workout::<S>)
                .delete(workout_handlers::delete_workout::<S>),
        )
        // Sessions
        .route(
            "/sessions",
            get(session_handlers::list_sessions::<S>).post(session_handlers::create_session::<S>),
        )
        .route(
            "/sessions/:id",
            patch(session_handlers::update_session::<S>)
                .get(session_handlers::get_session::<S>)
                .delete(session_handlers::delete_session::<S>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_api_key));

    Router::new()
        // Health check stays reachable without an API key
        .route("/health", get(handlers::health_check))
        .merge(resources)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}
