use crate::model::{Collection, Document, Fields, Id};
use anyhow::Result;

/// Inclusive bounds on a string-valued top-level field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRange {
    pub field: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl FieldRange {
    pub fn contains(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return self.from.is_none() && self.to.is_none();
        };
        if let Some(from) = &self.from {
            if value < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if value > to.as_str() {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBy {
    CreatedAt,
    /// A string-valued top-level field
    Field(String),
}

/// Listing options; the tenant filter is always applied by the store itself
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    pub order_by: OrderBy,
    pub descending: bool,
    pub range: Option<FieldRange>,
}

impl DocumentQuery {
    /// Most recently created first
    pub fn newest_first() -> Self {
        Self {
            order_by: OrderBy::CreatedAt,
            descending: true,
            range: None,
        }
    }

    pub fn descending_by(field: &str) -> Self {
        Self {
            order_by: OrderBy::Field(field.to_string()),
            descending: true,
            range: None,
        }
    }

    pub fn with_range(mut self, range: FieldRange) -> Self {
        self.range = Some(range);
        self
    }
}

impl Default for DocumentQuery {
    fn default() -> Self {
        Self::newest_first()
    }
}

/// Collection-oriented document persistence, scoped by tenant.
///
/// Every operation takes the owning user id; a document owned by another user
/// behaves exactly like a missing one.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document, assigning its id and `createdAt`
    async fn create_document(&self, collection: Collection, user_id: &str, fields: Fields) -> Result<Id>;
    async fn get_document(&self, collection: Collection, user_id: &str, id: &Id) -> Result<Option<Document>>;
    async fn list_documents(
        &self,
        collection: Collection,
        user_id: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>>;
    /// Merge-write the given top-level fields. Returns false if the document does not exist.
    async fn merge_document(&self, collection: Collection, user_id: &str, id: &Id, fields: Fields) -> Result<bool>;
    /// Returns whether a document was removed
    async fn delete_document(&self, collection: Collection, user_id: &str, id: &Id) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_range_is_inclusive() {
        let range = FieldRange {
            field: "date".to_string(),
            from: Some("2024-03-01".to_string()),
            to: Some("2024-03-31".to_string()),
        };
        assert!(range.contains(Some("2024-03-01")));
        assert!(range.contains(Some("2024-03-31")));
        assert!(!range.contains(Some("2024-04-01")));
        assert!(!range.contains(None));
    }

    #[test]
    fn test_open_range_matches_everything() {
        let range = FieldRange {
            field: "date".to_string(),
            ..Default::default()
        };
        assert!(range.contains(Some("1999-01-01")));
        assert!(range.contains(None));
    }
}
