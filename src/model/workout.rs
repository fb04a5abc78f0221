use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::{nullable, Collection, Entity, Exercise, Id};

/// Series count assigned to plan items built from a legacy `exerciseIds` body
pub const DEFAULT_SERIES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    #[validate(length(min = 1, message = "exerciseId is required"))]
    pub exercise_id: Id,
    #[validate(range(min = 1, message = "series must be at least 1"))]
    pub series: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "load must not be negative"))]
    pub load: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "targetReps must be at least 1"))]
    pub target_reps: Option<u32>,
}

impl PlanItem {
    pub fn with_default_series(exercise_id: Id) -> Self {
        Self {
            exercise_id,
            series: DEFAULT_SERIES,
            load: None,
            target_reps: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub plan: Vec<PlanItem>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Workout {
    const COLLECTION: Collection = Collection::Workouts;
    const LABEL: &'static str = "Workout";
}

impl Workout {
    /// Exercise ids in plan order, duplicates included
    pub fn exercise_ids(&self) -> Vec<Id> {
        self.plan.iter().map(|item| item.exercise_id.clone()).collect()
    }

    pub fn with_expanded_plan(self, plan: Vec<ExpandedPlanItem>) -> ExpandedWorkout {
        ExpandedWorkout {
            id: self.id,
            name: self.name,
            notes: self.notes,
            plan,
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub plan: Vec<PlanItem>,
}

impl NewWorkout {
    pub fn exercise_ids(&self) -> Vec<Id> {
        self.plan.iter().map(|item| item.exercise_id.clone()).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    /// Replaces the whole plan when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub plan: Option<Vec<PlanItem>>,
}

/// A plan entry with the referenced exercise spliced in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedPlanItem {
    #[serde(flatten)]
    pub item: PlanItem,
    pub exercise: Option<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedWorkout {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub plan: Vec<ExpandedPlanItem>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
