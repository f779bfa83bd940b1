use crate::{domain::ReviewStatus, error::Result};
use async_trait::async_trait;

pub mod memory;

#[cfg(feature = "file-store")]
pub mod file_store;

/// Backend contract for persisting a single item's status
///
/// The engine assumes nothing beyond per-item semantics: calls for one batch
/// move run concurrently and may fail independently. There is no batch or
/// transactional variant, and the engine never retries a failed call.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Persists the status of the item with durable id `id`; may reject
    async fn update_status(&self, id: &str, status: ReviewStatus) -> Result<()>;
}
