use crate::{domain::ReviewStatus, error::Result, store::StatusStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// One persisted status record, one JSON file per durable id
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: String,
    pub status: ReviewStatus,
    pub updated_at: DateTime<Utc>,
}

/// File-based status store
///
/// Writes records under `<root>/.caseboard/status/<id>.json`. Ids are backend
/// identifiers, never file paths, so they are safe as file stems.
pub struct FileStatusStore {
    root_path: PathBuf,
}

impl FileStatusStore {
    const CASEBOARD_DIR: &'static str = ".caseboard";
    const STATUS_DIR: &'static str = "status";

    /// Creates a store rooted at the given project directory
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::CASEBOARD_DIR),
        }
    }

    fn status_dir(&self) -> PathBuf {
        self.root_path.join(Self::STATUS_DIR)
    }

    fn record_file(&self, id: &str) -> PathBuf {
        self.status_dir().join(format!("{}.json", id))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Loads the record for `id`, if one has been written
    pub async fn load_record(&self, id: &str) -> Result<Option<StatusRecord>> {
        let file_path = self.record_file(id);
        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        let record: StatusRecord = serde_json::from_str(&contents)?;
        Ok(Some(record))
    }
}

#[async_trait]
impl StatusStore for FileStatusStore {
    async fn update_status(&self, id: &str, status: ReviewStatus) -> Result<()> {
        self.ensure_directory_exists(&self.status_dir()).await?;

        let record = StatusRecord {
            id: id.to_string(),
            status,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record)?;

        fs::write(self.record_file(id), json).await?;
        Ok(())
    }
}
