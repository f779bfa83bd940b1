use crate::{
    domain::{ReviewStatus, WorkItem},
    selection::SelectionModel,
};
use tracing::debug;
use uuid::Uuid;

/// What is being dragged
///
/// A multi-drag snapshots the selected items by value at gesture start; the
/// host changing its selection mid-gesture has no effect on the in-flight
/// drag.
#[derive(Debug, Clone)]
pub enum DragSource {
    Single(String),
    Multi(Vec<WorkItem>),
}

/// Where the pointer currently is, decoded once at the gesture boundary
///
/// Raw widget identifiers never cross into the transition or reorder logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Item { path: String },
    Lane { status: ReviewStatus },
}

/// The single action a released gesture resolves to
///
/// A drop onto an item in the source's own lane reorders within that lane. A
/// drop onto a lane, or onto an item in a *different* lane, transitions the
/// dragged items to that lane; treating an item as a proxy for its lane keeps
/// the decision table total (see DESIGN.md for the cross-lane-item and
/// multi-onto-item decisions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    None,
    Transition {
        paths: Vec<String>,
        target: ReviewStatus,
    },
    Reorder {
        source_path: String,
        dest_path: String,
    },
}

/// Ephemeral per-gesture state
#[derive(Debug, Clone)]
pub struct DragSession {
    pub gesture_id: Uuid,
    pub source: DragSource,
    pub target: Option<DropTarget>,
}

/// Drag session state machine: Idle → Dragging → (resolve) → Idle
///
/// Pure transition functions over discrete pointer events; no item list is
/// ever mutated here. The session is destroyed unconditionally at release or
/// cancel, whatever the downstream outcome.
#[derive(Debug, Default)]
pub struct DragStateMachine {
    session: Option<DragSession>,
}

impl DragStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current session, for hosts rendering a drag preview
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Starts a gesture on the item at `index`
    ///
    /// Multi-drag only when the selection has more than one member *and* the
    /// grabbed index is among them; otherwise the drag is single-item even if
    /// other items happen to be selected. The selection is read exactly once,
    /// here.
    pub fn on_drag_start(
        &mut self,
        items: &[WorkItem],
        index: usize,
        selection: &dyn SelectionModel,
    ) {
        let Some(grabbed) = items.get(index) else {
            return;
        };

        let selected = selection.current_selection();
        let source = if selected.len() > 1 && selection.is_selected(index) {
            let snapshot: Vec<WorkItem> = selected
                .iter()
                .filter_map(|&i| items.get(i).cloned())
                .collect();
            DragSource::Multi(snapshot)
        } else {
            DragSource::Single(grabbed.path.clone())
        };

        let gesture_id = Uuid::new_v4();
        debug!(%gesture_id, multi = matches!(source, DragSource::Multi(_)), "drag start");

        self.session = Some(DragSession {
            gesture_id,
            source,
            target: None,
        });
    }

    /// Records the current drop target; `None` means "no action if released"
    pub fn on_drag_over(&mut self, target: Option<DropTarget>) {
        if let Some(session) = self.session.as_mut() {
            session.target = target;
        }
    }

    /// Aborts the gesture with no effect, e.g. on focus loss
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(gesture_id = %session.gesture_id, "drag cancelled");
        }
    }

    /// Releases the gesture, classifying (source, target) into one action
    ///
    /// Always returns to Idle, whether or not the returned action goes on to
    /// succeed downstream.
    pub fn on_drag_end(&mut self, items: &[WorkItem]) -> DropAction {
        let Some(session) = self.session.take() else {
            return DropAction::None;
        };
        let Some(target) = session.target else {
            return DropAction::None;
        };

        let action = resolve(&session.source, &target, items);
        debug!(gesture_id = %session.gesture_id, ?action, "drag resolved");
        action
    }
}

fn status_of(items: &[WorkItem], path: &str) -> Option<ReviewStatus> {
    items
        .iter()
        .find(|item| item.path == path)
        .map(WorkItem::effective_status)
}

fn resolve(source: &DragSource, target: &DropTarget, items: &[WorkItem]) -> DropAction {
    match (source, target) {
        (DragSource::Single(source_path), DropTarget::Item { path: dest_path }) => {
            if source_path == dest_path {
                return DropAction::None;
            }
            let (Some(source_lane), Some(dest_lane)) =
                (status_of(items, source_path), status_of(items, dest_path))
            else {
                return DropAction::None;
            };
            if source_lane == dest_lane {
                DropAction::Reorder {
                    source_path: source_path.clone(),
                    dest_path: dest_path.clone(),
                }
            } else {
                // Cross-lane item drop: the item stands in for its lane.
                DropAction::Transition {
                    paths: vec![source_path.clone()],
                    target: dest_lane,
                }
            }
        }
        (DragSource::Single(source_path), DropTarget::Lane { status }) => DropAction::Transition {
            paths: vec![source_path.clone()],
            target: *status,
        },
        (DragSource::Multi(snapshot), DropTarget::Lane { status }) => DropAction::Transition {
            paths: snapshot.iter().map(|item| item.path.clone()).collect(),
            target: *status,
        },
        (DragSource::Multi(snapshot), DropTarget::Item { path: dest_path }) => {
            // A multi-drop onto an item targets that item's lane; members
            // already in it are dropped by the transition idempotence guard.
            let Some(dest_lane) = status_of(items, dest_path) else {
                return DropAction::None;
            };
            DropAction::Transition {
                paths: snapshot.iter().map(|item| item.path.clone()).collect(),
                target: dest_lane,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::IndexSelection;

    fn sample_items() -> Vec<WorkItem> {
        vec![
            WorkItem::new("/a"),
            WorkItem::new("/b").with_status(ReviewStatus::InProgress),
            WorkItem::new("/c").with_status(ReviewStatus::InProgress),
            WorkItem::new("/d").with_status(ReviewStatus::Reviewed),
        ]
    }

    #[test]
    fn test_single_drag_when_grabbed_item_not_in_selection() {
        let items = sample_items();
        let mut selection = IndexSelection::new();
        selection.toggle(2);
        selection.toggle(3);

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 0, &selection);

        match &machine.session().unwrap().source {
            DragSource::Single(path) => assert_eq!(path, "/a"),
            other => panic!("expected single source, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_drag_snapshots_selected_items() {
        let items = sample_items();
        let mut selection = IndexSelection::new();
        selection.toggle(1);
        selection.toggle(2);

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 1, &selection);

        match &machine.session().unwrap().source {
            DragSource::Multi(snapshot) => {
                let paths: Vec<&str> = snapshot.iter().map(|i| i.path.as_str()).collect();
                assert_eq!(paths, vec!["/b", "/c"]);
            }
            other => panic!("expected multi source, got {:?}", other),
        }
    }

    #[test]
    fn test_single_member_selection_is_still_single_drag() {
        let items = sample_items();
        let mut selection = IndexSelection::new();
        selection.select(1);

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 1, &selection);

        assert!(matches!(
            machine.session().unwrap().source,
            DragSource::Single(_)
        ));
    }

    #[test]
    fn test_snapshot_is_immune_to_later_selection_changes() {
        let items = sample_items();
        let mut selection = IndexSelection::new();
        selection.toggle(1);
        selection.toggle(2);

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 1, &selection);

        // Host mutates its selection mid-gesture.
        selection.clear();
        selection.select(3);

        machine.on_drag_over(Some(DropTarget::Lane {
            status: ReviewStatus::Reviewed,
        }));
        let action = machine.on_drag_end(&items);

        assert_eq!(
            action,
            DropAction::Transition {
                paths: vec!["/b".to_string(), "/c".to_string()],
                target: ReviewStatus::Reviewed,
            }
        );
    }

    #[test]
    fn test_release_without_target_is_no_action() {
        let items = sample_items();
        let selection = IndexSelection::new();

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 0, &selection);
        assert!(machine.is_active());

        assert_eq!(machine.on_drag_end(&items), DropAction::None);
        assert!(!machine.is_active());
    }

    #[test]
    fn test_cancel_clears_session() {
        let items = sample_items();
        let selection = IndexSelection::new();

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 0, &selection);
        machine.on_drag_over(Some(DropTarget::Lane {
            status: ReviewStatus::Flagged,
        }));
        machine.cancel();

        assert!(!machine.is_active());
        assert_eq!(machine.on_drag_end(&items), DropAction::None);
    }

    #[test]
    fn test_later_target_overwrites_earlier() {
        let items = sample_items();
        let selection = IndexSelection::new();

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 0, &selection);
        machine.on_drag_over(Some(DropTarget::Lane {
            status: ReviewStatus::Flagged,
        }));
        machine.on_drag_over(None);

        assert_eq!(machine.on_drag_end(&items), DropAction::None);
    }

    #[test]
    fn test_same_lane_item_drop_reorders() {
        let items = sample_items();
        let selection = IndexSelection::new();

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 1, &selection);
        machine.on_drag_over(Some(DropTarget::Item {
            path: "/c".to_string(),
        }));

        assert_eq!(
            machine.on_drag_end(&items),
            DropAction::Reorder {
                source_path: "/b".to_string(),
                dest_path: "/c".to_string(),
            }
        );
    }

    #[test]
    fn test_cross_lane_item_drop_transitions_to_its_lane() {
        let items = sample_items();
        let selection = IndexSelection::new();

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 1, &selection);
        machine.on_drag_over(Some(DropTarget::Item {
            path: "/d".to_string(),
        }));

        assert_eq!(
            machine.on_drag_end(&items),
            DropAction::Transition {
                paths: vec!["/b".to_string()],
                target: ReviewStatus::Reviewed,
            }
        );
    }

    #[test]
    fn test_multi_drop_onto_item_targets_its_lane() {
        let items = sample_items();
        let mut selection = IndexSelection::new();
        selection.toggle(1);
        selection.toggle(2);

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 2, &selection);
        machine.on_drag_over(Some(DropTarget::Item {
            path: "/d".to_string(),
        }));

        assert_eq!(
            machine.on_drag_end(&items),
            DropAction::Transition {
                paths: vec!["/b".to_string(), "/c".to_string()],
                target: ReviewStatus::Reviewed,
            }
        );
    }

    #[test]
    fn test_drop_onto_self_is_no_action() {
        let items = sample_items();
        let selection = IndexSelection::new();

        let mut machine = DragStateMachine::new();
        machine.on_drag_start(&items, 1, &selection);
        machine.on_drag_over(Some(DropTarget::Item {
            path: "/b".to_string(),
        }));

        assert_eq!(machine.on_drag_end(&items), DropAction::None);
    }
}
