use anyhow::Result;
use futures::future::try_join_all;
use itertools::Itertools;
use std::collections::HashMap;
use std::future::Future;

use crate::model::{
    Exercise, ExerciseClass, ExerciseWithClass, ExpandedPlanItem, ExpandedWorkout, Id,
    UserContext, Workout,
};
use crate::store::entity;
use crate::store::traits::DocumentStore;

/// Fan-out join over the references held by `parent`.
///
/// `ids_of` lists the referenced ids in their original order (duplicates
/// allowed). Each distinct id is looked up once, all lookups run
/// concurrently, and `splice` receives the parent together with an
/// id → document map in which dangling references map to `None`.
pub async fn expand<P, T, R, X, F, Fut, Sp>(parent: P, ids_of: X, lookup: F, splice: Sp) -> Result<R>
where
    X: FnOnce(&P) -> Vec<Id>,
    F: Fn(Id) -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
    Sp: FnOnce(P, &HashMap<Id, Option<T>>) -> R,
{
    let distinct: Vec<Id> = ids_of(&parent).into_iter().unique().collect();
    log::debug!("Expanding {} distinct reference(s)", distinct.len());

    let fetches = distinct.into_iter().map(|id| {
        let pending = lookup(id.clone());
        async move { pending.await.map(|found| (id, found)) }
    });
    let resolved: HashMap<Id, Option<T>> = try_join_all(fetches).await?.into_iter().collect();

    Ok(splice(parent, &resolved))
}

/// Attach the referenced exercise to every plan entry, keeping order and duplicates
pub async fn expand_workout<S>(store: &S, user: &UserContext, workout: Workout) -> Result<ExpandedWorkout>
where
    S: DocumentStore + ?Sized,
{
    expand(
        workout,
        |workout| workout.exercise_ids(),
        |id| async move { entity::find::<Exercise, S>(store, user, &id).await },
        |workout, exercises| {
            let plan = workout
                .plan
                .iter()
                .map(|item| ExpandedPlanItem {
                    item: item.clone(),
                    exercise: exercises.get(&item.exercise_id).cloned().flatten(),
                })
                .collect();
            workout.with_expanded_plan(plan)
        },
    )
    .await
}

/// Attach each exercise's class; many exercises share a class so it is fetched once
pub async fn expand_exercise_classes<S>(
    store: &S,
    user: &UserContext,
    exercises: Vec<Exercise>,
) -> Result<Vec<ExerciseWithClass>>
where
    S: DocumentStore + ?Sized,
{
    expand(
        exercises,
        |exercises| exercises.iter().map(|e| e.class_id.clone()).collect(),
        |id| async move { entity::find::<ExerciseClass, S>(store, user, &id).await },
        |exercises, classes| {
            exercises
                .into_iter()
                .map(|exercise| {
                    let class = classes.get(&exercise.class_id).cloned().flatten();
                    ExerciseWithClass { exercise, class }
                })
                .collect()
        },
    )
    .await
}
