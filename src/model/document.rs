use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::{Collection, Fields, Id, RESERVED_KEYS};

/// A schema-less record as the store sees it.
///
/// Serializes flat: `{ ...fields, id, userId, createdAt }`, which is also the
/// shape every typed entity deserializes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(flatten)]
    pub fields: Fields,
    pub id: Id,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(id: Id, user_id: String, created_at: DateTime<Utc>, mut fields: Fields) -> Self {
        for key in RESERVED_KEYS {
            fields.remove(key);
        }
        Self {
            fields,
            id,
            user_id,
            created_at,
        }
    }

    /// Shallow merge: every top-level key in `patch` replaces the stored value
    pub fn merge(&mut self, patch: Fields) {
        for (key, value) in patch {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    /// String value of a top-level field, used for range filters and ordering
    pub fn field_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_str())
    }

    pub fn into_entity<E: Entity>(self) -> anyhow::Result<E> {
        let id = self.id.clone();
        let value = serde_json::to_value(self)?;
        serde_json::from_value(value).map_err(|e| {
            anyhow::anyhow!(
                "document {} in {} does not match its schema: {}",
                id,
                E::COLLECTION,
                e
            )
        })
    }
}

/// A typed view over documents of one collection
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Label used in not-found messages
    const LABEL: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_new_drops_reserved_keys() {
        let doc = Document::new(
            "d1".to_string(),
            "u1".to_string(),
            Utc::now(),
            fields(json!({"id": "other", "name": "Costas"})),
        );
        assert_eq!(doc.id, "d1");
        assert!(!doc.fields.contains_key("id"));
    }

    #[test]
    fn test_merge_replaces_only_patched_keys() {
        let mut doc = Document::new(
            "d1".to_string(),
            "u1".to_string(),
            Utc::now(),
            fields(json!({"name": "Treino A", "notes": "leve"})),
        );
        doc.merge(fields(json!({"name": "Treino B", "userId": "intruder"})));

        assert_eq!(doc.fields["name"], json!("Treino B"));
        assert_eq!(doc.fields["notes"], json!("leve"));
        assert_eq!(doc.user_id, "u1");
    }

    #[test]
    fn test_serializes_flat() {
        let doc = Document::new(
            "d1".to_string(),
            "u1".to_string(),
            Utc::now(),
            fields(json!({"name": "Peito"})),
        );
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], json!("d1"));
        assert_eq!(value["userId"], json!("u1"));
        assert_eq!(value["name"], json!("Peito"));
        assert!(value["createdAt"].is_string());
    }
}
