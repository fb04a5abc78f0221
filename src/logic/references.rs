use futures::future::try_join_all;
use std::future::Future;

use crate::error::{AppError, ReferenceKind};
use crate::model::Id;

/// Check that every id resolves, issuing all lookups concurrently.
///
/// Ids are not de-duplicated. Missing ids are reported in input order; a
/// failed lookup aborts with a store error.
pub async fn validate_references<F, Fut>(
    kind: ReferenceKind,
    ids: &[Id],
    lookup: F,
) -> Result<(), AppError>
where
    F: Fn(Id) -> Fut,
    Fut: Future<Output = anyhow::Result<bool>>,
{
    if ids.is_empty() {
        return Ok(());
    }
    log::debug!("Checking {} {:?} reference(s)", ids.len(), kind);

    let checks = ids.iter().map(|id| {
        let id = id.clone();
        let pending = lookup(id.clone());
        async move { pending.await.map(|exists| (id, exists)) }
    });
    let results = try_join_all(checks).await?;

    let missing: Vec<Id> = results
        .into_iter()
        .filter(|(_, exists)| !exists)
        .map(|(id, _)| id)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        log::warn!("Rejecting write with missing {:?} references: {:?}", kind, missing);
        Err(AppError::MissingReferences { kind, ids: missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ids(values: &[&str]) -> Vec<Id> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_reports_only_missing_ids() {
        let existing: HashSet<Id> = ids(&["y"]).into_iter().collect();
        let result = validate_references(ReferenceKind::Exercise, &ids(&["x", "y"]), |id| {
            let found = existing.contains(&id);
            async move { Ok::<_, anyhow::Error>(found) }
        })
        .await;

        match result {
            Err(AppError::MissingReferences { kind, ids }) => {
                assert_eq!(kind, ReferenceKind::Exercise);
                assert_eq!(ids, vec!["x".to_string()]);
            }
            other => panic!("expected missing references, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_message_names_missing_id_only() {
        let err = validate_references(ReferenceKind::Exercise, &ids(&["x", "y"]), |id| async move {
            Ok::<_, anyhow::Error>(id == "y")
        })
        .await
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains('x'));
        assert!(!message.contains('y'));
    }

    #[tokio::test]
    async fn test_all_present_succeeds() {
        let calls = AtomicUsize::new(0);
        let result = validate_references(ReferenceKind::Exercise, &ids(&["a", "b"]), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, anyhow::Error>(true) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_duplicates_are_checked_each_time() {
        let calls = AtomicUsize::new(0);
        let err = validate_references(ReferenceKind::Exercise, &ids(&["d", "d"]), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, anyhow::Error>(false) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(err.to_string(), "exerciseIds inexistentes: d, d");
    }

    #[tokio::test]
    async fn test_lookup_failure_is_a_store_error() {
        let err = validate_references(ReferenceKind::ExerciseClass, &ids(&["c"]), |_| async {
            Err::<bool, _>(anyhow::anyhow!("store offline"))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Store(_)));
    }

    #[tokio::test]
    async fn test_empty_input_skips_lookups() {
        let calls = AtomicUsize::new(0);
        let result = validate_references(ReferenceKind::Exercise, &[], |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, anyhow::Error>(true) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
