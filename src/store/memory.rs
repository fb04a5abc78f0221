use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{generate_id, Collection, Document, Fields, Id};
use crate::store::traits::{DocumentQuery, DocumentStore, OrderBy};

#[derive(Debug, Clone)]
struct StoredDocument {
    document: Document,
    /// Insertion counter, breaks `createdAt` ties
    seq: u64,
}

#[derive(Debug, Default)]
struct Collections {
    documents: HashMap<(Collection, Id), StoredDocument>,
    next_seq: u64,
}

/// Process-local document store backed by a locked map.
///
/// The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection, across all users
    pub fn count(&self, collection: Collection) -> usize {
        self.inner
            .read()
            .documents
            .keys()
            .filter(|(c, _)| *c == collection)
            .count()
    }
}

fn compare(a: &StoredDocument, b: &StoredDocument, order_by: &OrderBy) -> Ordering {
    let primary = match order_by {
        OrderBy::CreatedAt => a.document.created_at.cmp(&b.document.created_at),
        OrderBy::Field(field) => a.document.field_str(field).cmp(&b.document.field_str(field)),
    };
    primary.then(a.seq.cmp(&b.seq))
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(&self, collection: Collection, user_id: &str, fields: Fields) -> Result<Id> {
        let id = generate_id();
        let document = Document::new(id.clone(), user_id.to_string(), Utc::now(), fields);

        let mut inner = self.inner.write();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner
            .documents
            .insert((collection, id.clone()), StoredDocument { document, seq });

        Ok(id)
    }

    async fn get_document(&self, collection: Collection, user_id: &str, id: &Id) -> Result<Option<Document>> {
        let inner = self.inner.read();
        Ok(inner
            .documents
            .get(&(collection, id.clone()))
            .filter(|stored| stored.document.user_id == user_id)
            .map(|stored| stored.document.clone()))
    }

    async fn list_documents(
        &self,
        collection: Collection,
        user_id: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>> {
        let mut matching: Vec<StoredDocument> = {
            let inner = self.inner.read();
            inner
                .documents
                .iter()
                .filter(|((c, _), stored)| *c == collection && stored.document.user_id == user_id)
                .filter(|(_, stored)| match &query.range {
                    Some(range) => range.contains(stored.document.field_str(&range.field)),
                    None => true,
                })
                .map(|(_, stored)| stored.clone())
                .collect()
        };

        matching.sort_by(|a, b| {
            let ordering = compare(a, b, &query.order_by);
            if query.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        Ok(matching.into_iter().map(|stored| stored.document).collect())
    }

    async fn merge_document(&self, collection: Collection, user_id: &str, id: &Id, fields: Fields) -> Result<bool> {
        let mut inner = self.inner.write();
        match inner.documents.get_mut(&(collection, id.clone())) {
            Some(stored) if stored.document.user_id == user_id => {
                stored.document.merge(fields);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_document(&self, collection: Collection, user_id: &str, id: &Id) -> Result<bool> {
        let mut inner = self.inner.write();
        let key = (collection, id.clone());
        let owned = inner
            .documents
            .get(&key)
            .is_some_and(|stored| stored.document.user_id == user_id);
        if owned {
            inner.documents.remove(&key);
        }
        Ok(owned)
    }
}
