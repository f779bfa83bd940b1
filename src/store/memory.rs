use crate::{
    domain::ReviewStatus,
    error::{BoardError, Result},
    store::StatusStore,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

/// In-memory status store
///
/// Used as the backend for previews and dry runs, and as the rejection-capable
/// double the rollback tests are written against.
#[derive(Default)]
pub struct MemoryStatusStore {
    statuses: Mutex<HashMap<String, ReviewStatus>>,
    rejected_ids: Mutex<HashSet<String>>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every future update for `id` fail
    pub async fn reject_id(&self, id: impl Into<String>) {
        self.rejected_ids.lock().await.insert(id.into());
    }

    /// The last persisted status for `id`, if any
    pub async fn status_of(&self, id: &str) -> Option<ReviewStatus> {
        self.statuses.lock().await.get(id).copied()
    }

    /// Number of successfully persisted updates so far
    pub async fn persisted_count(&self) -> usize {
        self.statuses.lock().await.len()
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn update_status(&self, id: &str, status: ReviewStatus) -> Result<()> {
        if self.rejected_ids.lock().await.contains(id) {
            return Err(BoardError::UpdateRejected {
                id: id.to_string(),
                reason: "rejected by store".to_string(),
            });
        }
        self.statuses.lock().await.insert(id.to_string(), status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_and_read_back() {
        let store = MemoryStatusStore::new();
        store
            .update_status("it-1", ReviewStatus::Reviewed)
            .await
            .unwrap();

        assert_eq!(store.status_of("it-1").await, Some(ReviewStatus::Reviewed));
        assert_eq!(store.persisted_count().await, 1);
    }

    #[tokio::test]
    async fn test_rejected_id_fails_without_persisting() {
        let store = MemoryStatusStore::new();
        store.reject_id("it-2").await;

        let err = store
            .update_status("it-2", ReviewStatus::Flagged)
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::UpdateRejected { .. }));
        assert_eq!(store.status_of("it-2").await, None);
    }
}
