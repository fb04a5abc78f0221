use crate::error::ReferenceKind;
use crate::logic::validate_references;
use crate::model::{
    Exercise, ExerciseClass, NewExercise, NewExerciseClass, NewWorkout, PlanItem, UserContext,
    Workout,
};
use crate::store::entity;
use crate::store::traits::{DocumentQuery, DocumentStore};
use anyhow::Result;

/// Demo catalog: (class, description, [(exercise, muscle group)])
const CATALOG: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "Peito",
        "Empurrar na horizontal",
        &[("Supino reto", "Peitoral"), ("Crucifixo", "Peitoral")],
    ),
    (
        "Costas",
        "Puxar na vertical e horizontal",
        &[("Barra fixa", "Dorsal"), ("Remada curvada", "Dorsal")],
    ),
    (
        "Pernas",
        "Membros inferiores",
        &[("Agachamento", "Quadríceps"), ("Stiff", "Posterior de coxa")],
    ),
];

/// Populate the given user's collections with a small demo catalog.
///
/// Skipped when the user already has exercise classes, so restarts do not
/// duplicate data.
pub async fn load_seed_data<S: DocumentStore>(store: &S, user: &UserContext) -> Result<()> {
    let existing =
        entity::list::<ExerciseClass, S>(store, user, &DocumentQuery::newest_first()).await?;
    if !existing.is_empty() {
        log::info!(
            "Seed data skipped: {} already has {} exercise class(es)",
            user.user_id,
            existing.len()
        );
        return Ok(());
    }

    let mut exercises: Vec<Exercise> = Vec::new();
    for (class_name, description, members) in CATALOG {
        let class: ExerciseClass = entity::insert(
            store,
            user,
            &NewExerciseClass {
                name: class_name.to_string(),
                description: Some(description.to_string()),
            },
        )
        .await?;

        for (exercise_name, muscle_group) in members.iter() {
            let exercise: Exercise = entity::insert(
                store,
                user,
                &NewExercise {
                    name: exercise_name.to_string(),
                    class_id: class.id.clone(),
                    muscle_group: Some(muscle_group.to_string()),
                },
            )
            .await?;
            exercises.push(exercise);
        }
    }

    let workout = NewWorkout {
        name: "Treino A".to_string(),
        notes: Some("Corpo inteiro, 3x por semana".to_string()),
        plan: exercises
            .iter()
            .step_by(2)
            .map(|exercise| PlanItem::with_default_series(exercise.id.clone()))
            .collect(),
    };
    validate_references(ReferenceKind::Exercise, &workout.exercise_ids(), |id| async move {
        entity::exists::<Exercise, S>(store, user, &id).await
    })
    .await?;
    let workout: Workout = entity::insert(store, user, &workout).await?;

    log::info!(
        "Seeded {} classes, {} exercises and workout {} for {}",
        CATALOG.len(),
        exercises.len(),
        workout.id,
        user.user_id
    );
    Ok(())
}
