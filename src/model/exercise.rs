use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::{nullable, Collection, Entity, ExerciseClass, Id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Id,
    pub name: String,
    /// References an ExerciseClass owned by the same user
    pub class_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Exercise {
    const COLLECTION: Collection = Collection::Exercises;
    const LABEL: &'static str = "Exercise";
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "classId is required"))]
    pub class_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "classId must not be empty"))]
    pub class_id: Option<Id>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<Option<String>>,
}

/// Exercise joined with its class; `class` is null when the class was deleted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseWithClass {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub class: Option<ExerciseClass>,
}
