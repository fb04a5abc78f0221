use serde_json::{json, Value};

use crate::model::DEFAULT_SERIES;

/// Rewrite a legacy workout body onto the current shape.
///
/// `{exerciseIds: [a, b]}` without a `plan` becomes
/// `{plan: [{exerciseId: a, series: 3}, {exerciseId: b, series: 3}]}`.
/// When `plan` is present it wins and `exerciseIds` is stripped. The caller's
/// value is never mutated.
pub fn normalize_workout_body(raw: &Value) -> Value {
    let mut body = raw.clone();
    let Some(object) = body.as_object_mut() else {
        return body;
    };

    let has_plan = object.get("plan").is_some_and(|plan| !plan.is_null());
    let legacy_ids = match object.get("exerciseIds") {
        Some(Value::Array(ids)) if !has_plan => Some(ids.clone()),
        _ => None,
    };

    if let Some(ids) = legacy_ids {
        let plan: Vec<Value> = ids
            .into_iter()
            .map(|id| json!({ "exerciseId": id, "series": DEFAULT_SERIES }))
            .collect();
        object.insert("plan".to_string(), Value::Array(plan));
        object.remove("exerciseIds");
    } else if has_plan {
        object.remove("exerciseIds");
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_ids_become_plan_with_three_series() {
        let raw = json!({"name": "Leg Day", "exerciseIds": ["a", "b", "c"]});
        let body = normalize_workout_body(&raw);

        assert_eq!(
            body["plan"],
            json!([
                {"exerciseId": "a", "series": 3},
                {"exerciseId": "b", "series": 3},
                {"exerciseId": "c", "series": 3}
            ])
        );
        assert!(body.get("exerciseIds").is_none());
        assert_eq!(body["name"], json!("Leg Day"));
    }

    #[test]
    fn test_plan_wins_over_exercise_ids() {
        let raw = json!({
            "name": "Push",
            "plan": [{"exerciseId": "p", "series": 5}],
            "exerciseIds": ["ignored"]
        });
        let body = normalize_workout_body(&raw);

        assert_eq!(body["plan"], json!([{"exerciseId": "p", "series": 5}]));
        assert!(body.get("exerciseIds").is_none());
    }

    #[test]
    fn test_caller_value_is_untouched() {
        let raw = json!({"exerciseIds": ["a"]});
        let _ = normalize_workout_body(&raw);
        assert_eq!(raw, json!({"exerciseIds": ["a"]}));
    }

    #[test]
    fn test_bodies_without_legacy_fields_pass_through() {
        let raw = json!({"name": "Rest"});
        assert_eq!(normalize_workout_body(&raw), raw);

        let not_an_object = json!("plain string");
        assert_eq!(normalize_workout_body(&not_an_object), not_an_object);
    }

    #[test]
    fn test_non_array_exercise_ids_are_left_alone() {
        let raw = json!({"name": "Odd", "exerciseIds": "a,b"});
        assert_eq!(normalize_workout_body(&raw), raw);
    }
}
