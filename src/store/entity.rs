//! Typed access to the document store.
//!
//! These helpers convert between request payloads, raw documents and the
//! entity structs in `model`, always threading the caller's user id.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::model::{to_fields, Entity, Id, UserContext};
use crate::store::traits::{DocumentQuery, DocumentStore};

pub async fn find<E, S>(store: &S, user: &UserContext, id: &Id) -> Result<Option<E>>
where
    E: Entity,
    S: DocumentStore + ?Sized,
{
    store
        .get_document(E::COLLECTION, user.id(), id)
        .await?
        .map(|doc| doc.into_entity::<E>())
        .transpose()
}

pub async fn exists<E, S>(store: &S, user: &UserContext, id: &Id) -> Result<bool>
where
    E: Entity,
    S: DocumentStore + ?Sized,
{
    Ok(store.get_document(E::COLLECTION, user.id(), id).await?.is_some())
}

pub async fn list<E, S>(store: &S, user: &UserContext, query: &DocumentQuery) -> Result<Vec<E>>
where
    E: Entity,
    S: DocumentStore + ?Sized,
{
    store
        .list_documents(E::COLLECTION, user.id(), query)
        .await?
        .into_iter()
        .map(|doc| doc.into_entity::<E>())
        .collect()
}

/// Persist a new document, then read it back so the result carries the
/// server-assigned id and timestamp.
pub async fn insert<E, S, P>(store: &S, user: &UserContext, payload: &P) -> Result<E>
where
    E: Entity,
    S: DocumentStore + ?Sized,
    P: Serialize + Sync,
{
    let fields = to_fields(payload)?;
    let id = store.create_document(E::COLLECTION, user.id(), fields).await?;
    find::<E, S>(store, user, &id)
        .await?
        .ok_or_else(|| anyhow!("{} {} disappeared right after creation", E::LABEL, id))
}

/// Merge-write a partial payload. `None` when the document does not exist for this user.
pub async fn update<E, S, P>(store: &S, user: &UserContext, id: &Id, patch: &P) -> Result<Option<E>>
where
    E: Entity,
    S: DocumentStore + ?Sized,
    P: Serialize + Sync,
{
    let fields = to_fields(patch)?;
    if !store.merge_document(E::COLLECTION, user.id(), id, fields).await? {
        return Ok(None);
    }
    find::<E, S>(store, user, id).await
}

pub async fn remove<E, S>(store: &S, user: &UserContext, id: &Id) -> Result<bool>
where
    E: Entity,
    S: DocumentStore + ?Sized,
{
    store.delete_document(E::COLLECTION, user.id(), id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExerciseClass, NewExerciseClass};
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_insert_reads_back_server_fields() {
        let store = MemoryStore::new();
        let user = UserContext::new("u1");
        let payload = NewExerciseClass {
            name: "Peito".to_string(),
            description: None,
        };

        let class: ExerciseClass = insert(&store, &user, &payload).await.unwrap();
        assert_eq!(class.name, "Peito");
        assert_eq!(class.user_id, "u1");
        assert!(!class.id.is_empty());
        assert!(exists::<ExerciseClass, _>(&store, &user, &class.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryStore::new();
        let user = UserContext::new("u1");
        let patch = serde_json::json!({"name": "Costas"});

        let updated: Option<ExerciseClass> = update(&store, &user, &"ghost".to_string(), &patch)
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
