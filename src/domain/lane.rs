use crate::domain::item::{ReviewStatus, WorkItem};

/// Canonical display order of the board's lanes
///
/// Lanes always render in this order; list rebuilds after a reorder walk it to
/// keep unaffected lanes stable.
pub const CANONICAL_LANES: [ReviewStatus; 5] = [
    ReviewStatus::Unreviewed,
    ReviewStatus::InProgress,
    ReviewStatus::Reviewed,
    ReviewStatus::Flagged,
    ReviewStatus::Finalized,
];

/// Rank of a status within the canonical lane order
pub fn lane_rank(status: ReviewStatus) -> u8 {
    match status {
        ReviewStatus::Unreviewed => 0,
        ReviewStatus::InProgress => 1,
        ReviewStatus::Reviewed => 2,
        ReviewStatus::Flagged => 3,
        ReviewStatus::Finalized => 4,
    }
}

/// A derived, non-owned view of one lane: the subsequence of the current item
/// list sharing one effective status, in list order
#[derive(Debug)]
pub struct Lane<'a> {
    pub status: ReviewStatus,
    pub items: Vec<&'a WorkItem>,
}

impl Lane<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Derives all lanes from the current item list, in canonical order
///
/// Every lane is present even when empty. Recompute after every published
/// list; lanes are never cached across publishes.
pub fn lanes(items: &[WorkItem]) -> Vec<Lane<'_>> {
    CANONICAL_LANES
        .iter()
        .map(|&status| Lane {
            status,
            items: items
                .iter()
                .filter(|item| item.effective_status() == status)
                .collect(),
        })
        .collect()
}

/// The ordered paths of the lane a given status groups under
pub fn lane_paths(items: &[WorkItem], status: ReviewStatus) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.effective_status() == status)
        .map(|item| item.path.clone())
        .collect()
}
