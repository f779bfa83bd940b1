use crate::domain::{WorkItem, CANONICAL_LANES};

/// Moves `source_path` next to `dest_path` within their shared lane
///
/// Splice semantics: the source entry is removed, then reinserted at the
/// destination's pre-removal index. Dragging an earlier item onto a later one
/// therefore lands *after* the destination, and the reverse lands *before*
/// it; a round trip does not restore the original order and is not meant to.
///
/// Returns `None` when the two paths do not resolve to distinct items in one
/// lane. The rebuilt list walks lanes in canonical display order; membership
/// of every lane and the internal order of every other lane are unchanged.
/// Manual order is process-local only and is never persisted.
pub fn reorder_within_lane(
    items: &[WorkItem],
    source_path: &str,
    dest_path: &str,
) -> Option<Vec<WorkItem>> {
    if source_path == dest_path {
        return None;
    }

    let source = items.iter().find(|item| item.path == source_path)?;
    let dest = items.iter().find(|item| item.path == dest_path)?;
    let lane = source.effective_status();
    if dest.effective_status() != lane {
        return None;
    }

    // Splice within the lane's ordered subsequence.
    let mut lane_items: Vec<WorkItem> = items
        .iter()
        .filter(|item| item.effective_status() == lane)
        .cloned()
        .collect();
    let source_idx = lane_items.iter().position(|item| item.path == source_path)?;
    let dest_idx = lane_items.iter().position(|item| item.path == dest_path)?;
    let moved = lane_items.remove(source_idx);
    lane_items.insert(dest_idx, moved);

    // Rebuild the global list lane by lane, substituting the spliced one.
    let mut rebuilt = Vec::with_capacity(items.len());
    for status in CANONICAL_LANES {
        if status == lane {
            rebuilt.append(&mut lane_items);
        } else {
            rebuilt.extend(
                items
                    .iter()
                    .filter(|item| item.effective_status() == status)
                    .cloned(),
            );
        }
    }
    Some(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{lane_paths, ReviewStatus};
    use std::collections::BTreeSet;

    fn sample_items() -> Vec<WorkItem> {
        vec![
            WorkItem::new("/u1"),
            WorkItem::new("/p1").with_status(ReviewStatus::InProgress),
            WorkItem::new("/p2").with_status(ReviewStatus::InProgress),
            WorkItem::new("/p3").with_status(ReviewStatus::InProgress),
            WorkItem::new("/r1").with_status(ReviewStatus::Reviewed),
        ]
    }

    #[test]
    fn test_earlier_source_lands_after_destination() {
        let items = sample_items();
        let rebuilt = reorder_within_lane(&items, "/p1", "/p3").unwrap();
        assert_eq!(
            lane_paths(&rebuilt, ReviewStatus::InProgress),
            vec!["/p2", "/p3", "/p1"]
        );
    }

    #[test]
    fn test_later_source_lands_before_destination() {
        let items = sample_items();
        let rebuilt = reorder_within_lane(&items, "/p3", "/p1").unwrap();
        assert_eq!(
            lane_paths(&rebuilt, ReviewStatus::InProgress),
            vec!["/p3", "/p1", "/p2"]
        );
    }

    #[test]
    fn test_round_trip_is_asymmetric() {
        let items = sample_items();
        let once = reorder_within_lane(&items, "/p1", "/p3").unwrap();
        let back = reorder_within_lane(&once, "/p1", "/p3").unwrap();

        // Second identical drag keeps shifting; this is splice, not swap.
        assert_eq!(
            lane_paths(&once, ReviewStatus::InProgress),
            vec!["/p2", "/p3", "/p1"]
        );
        assert_eq!(
            lane_paths(&back, ReviewStatus::InProgress),
            vec!["/p2", "/p1", "/p3"]
        );
    }

    #[test]
    fn test_membership_of_every_lane_is_preserved() {
        let items = sample_items();
        let rebuilt = reorder_within_lane(&items, "/p2", "/p1").unwrap();

        for status in CANONICAL_LANES {
            let before: BTreeSet<String> = lane_paths(&items, status).into_iter().collect();
            let after: BTreeSet<String> = lane_paths(&rebuilt, status).into_iter().collect();
            assert_eq!(before, after, "lane {:?} membership changed", status);
        }
        assert_eq!(rebuilt.len(), items.len());
    }

    #[test]
    fn test_other_lanes_keep_their_order() {
        let items = vec![
            WorkItem::new("/u2"),
            WorkItem::new("/u1"),
            WorkItem::new("/p1").with_status(ReviewStatus::InProgress),
            WorkItem::new("/p2").with_status(ReviewStatus::InProgress),
        ];
        let rebuilt = reorder_within_lane(&items, "/p1", "/p2").unwrap();

        assert_eq!(
            lane_paths(&rebuilt, ReviewStatus::Unreviewed),
            vec!["/u2", "/u1"]
        );
    }

    #[test]
    fn test_cross_lane_pair_is_rejected() {
        let items = sample_items();
        assert!(reorder_within_lane(&items, "/p1", "/r1").is_none());
    }

    #[test]
    fn test_unknown_path_is_rejected() {
        let items = sample_items();
        assert!(reorder_within_lane(&items, "/p1", "/missing").is_none());
        assert!(reorder_within_lane(&items, "/missing", "/p1").is_none());
    }

    #[test]
    fn test_source_equals_destination_is_rejected() {
        let items = sample_items();
        assert!(reorder_within_lane(&items, "/p1", "/p1").is_none());
    }
}
