use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub type Id = String;

/// Top-level fields of a stored document, excluding the system stamps
pub type Fields = Map<String, Value>;

/// Keys owned by the store; request payloads can never overwrite them
pub const RESERVED_KEYS: [&str; 3] = ["id", "userId", "createdAt"];

/// The flat collections the service persists into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    ExerciseClasses,
    Exercises,
    Workouts,
    Sessions,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::ExerciseClasses => "exerciseClasses",
            Collection::Exercises => "exercises",
            Collection::Workouts => "workouts",
            Collection::Sessions => "sessions",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Patch field deserializer telling an explicit `null` apart from an absent key.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>`: absent is `None`, `null` is `Some(None)` and clears the
/// stored value on merge.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Serialize a request struct into document fields, dropping reserved keys.
///
/// `None` options are expected to be skipped by the struct's serde attributes so
/// that a partial patch only carries the fields the caller sent.
pub fn to_fields<T: Serialize>(value: &T) -> anyhow::Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            for key in RESERVED_KEYS {
                map.remove(key);
            }
            Ok(map)
        }
        other => Err(anyhow::anyhow!(
            "expected a JSON object for document fields, got {}",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::ExerciseClasses.name(), "exerciseClasses");
        assert_eq!(Collection::Sessions.to_string(), "sessions");
    }

    #[test]
    fn test_to_fields_strips_reserved_keys() {
        let fields = to_fields(&json!({
            "id": "forged",
            "userId": "someone-else",
            "createdAt": "1970-01-01T00:00:00Z",
            "name": "Supino"
        }))
        .unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["name"], json!("Supino"));
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct NotesPatch {
        #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn test_nullable_separates_null_from_absent() {
        let absent: NotesPatch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.notes, None);
        assert!(to_fields(&absent).unwrap().is_empty());

        let cleared: NotesPatch = serde_json::from_value(json!({"notes": null})).unwrap();
        assert_eq!(cleared.notes, Some(None));
        assert_eq!(to_fields(&cleared).unwrap()["notes"], Value::Null);

        let set: NotesPatch = serde_json::from_value(json!({"notes": "leve"})).unwrap();
        assert_eq!(set.notes, Some(Some("leve".to_string())));
    }

    #[test]
    fn test_to_fields_rejects_non_objects() {
        assert!(to_fields(&json!(["a", "b"])).is_err());
    }
}
