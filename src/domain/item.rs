use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Review status of a work item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Unreviewed,
    InProgress,
    Reviewed,
    Flagged,
    Finalized,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreviewed => write!(f, "Unreviewed"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Reviewed => write!(f, "Reviewed"),
            Self::Flagged => write!(f, "Flagged"),
            Self::Finalized => write!(f, "Finalized"),
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unreviewed" => Ok(Self::Unreviewed),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "reviewed" => Ok(Self::Reviewed),
            "flagged" => Ok(Self::Flagged),
            "finalized" => Ok(Self::Finalized),
            _ => Err(crate::error::BoardError::InvalidStatus(s.to_string())),
        }
    }
}

/// One file under review
///
/// `path` is the stable identity key, unique within the working set. `id` is
/// assigned by the backend once the item has been persisted; items without an
/// `id` are local-only and are organized without any store call. An absent
/// `status` means the same thing as `Unreviewed` everywhere in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
}

impl WorkItem {
    /// Creates a new, local-only item at the default status
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            id: None,
            status: None,
        }
    }

    /// Sets the durable backend identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets an explicit status
    pub fn with_status(mut self, status: ReviewStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// The status this item is grouped, filtered and counted under
    ///
    /// Absence of a stored status defaults to `Unreviewed`.
    pub fn effective_status(&self) -> ReviewStatus {
        self.status.unwrap_or(ReviewStatus::Unreviewed)
    }
}
