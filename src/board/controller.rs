use crate::{
    board::reorder::reorder_within_lane,
    board::session::{DragStateMachine, DropAction, DropTarget},
    domain::{lanes, Lane, ReviewStatus, WorkItem},
    selection::SelectionModel,
    store::StatusStore,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Invoked synchronously after every optimistic publish and every rollback;
/// each invocation carries the new source of truth
pub type PublishListener = Box<dyn FnMut(&[WorkItem])>;

/// One failed persistence call, after its item has been rolled back
#[derive(Debug, Clone)]
pub struct TransitionFailure {
    pub path: String,
    pub id: String,
    pub attempted: ReviewStatus,
    pub reverted_to: Option<ReviewStatus>,
    pub reason: String,
}

/// Hook for the host's toast/notification surface
pub type FailureListener = Box<dyn FnMut(&TransitionFailure)>;

/// Owns the published item list and turns resolved gestures into list changes
///
/// Cross-lane moves publish optimistically and persist each affected item
/// concurrently through the [`StatusStore`], rolling back per item on
/// failure. Intra-lane reorders publish locally and never touch the store.
pub struct BoardController {
    items: Vec<WorkItem>,
    session: DragStateMachine,
    store: Arc<dyn StatusStore>,
    on_items_change: PublishListener,
    on_failure: Option<FailureListener>,
}

impl BoardController {
    pub fn new(
        store: Arc<dyn StatusStore>,
        on_items_change: impl FnMut(&[WorkItem]) + 'static,
    ) -> Self {
        Self {
            items: Vec::new(),
            session: DragStateMachine::new(),
            store,
            on_items_change: Box::new(on_items_change),
            on_failure: None,
        }
    }

    /// Routes failed persistence calls to the host, e.g. for a toast
    pub fn with_failure_listener(
        mut self,
        on_failure: impl FnMut(&TransitionFailure) + 'static,
    ) -> Self {
        self.on_failure = Some(Box::new(on_failure));
        self
    }

    /// Replaces the working set wholesale, e.g. after an import
    ///
    /// Input from the item store is authoritative; no publish is emitted for
    /// it. Any in-flight gesture is cancelled, since its paths may be gone.
    pub fn replace_items(&mut self, items: Vec<WorkItem>) {
        self.session.cancel();
        self.items = items;
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// The current lane decomposition, re-derived on every call
    pub fn lanes(&self) -> Vec<Lane<'_>> {
        lanes(&self.items)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    // ----- gesture surface -------------------------------------------------

    pub fn on_drag_start(&mut self, index: usize, selection: &dyn SelectionModel) {
        self.session.on_drag_start(&self.items, index, selection);
    }

    pub fn on_drag_over(&mut self, target: Option<DropTarget>) {
        self.session.on_drag_over(target);
    }

    pub fn cancel_drag(&mut self) {
        self.session.cancel();
    }

    /// Releases the gesture and applies the one action it resolves to
    ///
    /// The session is gone by the time the downstream algorithm runs; its
    /// outcome cannot leave the machine stuck mid-gesture.
    pub async fn on_drag_end(&mut self) -> DropAction {
        let action = self.session.on_drag_end(&self.items);
        match action.clone() {
            DropAction::None => {}
            DropAction::Reorder {
                source_path,
                dest_path,
            } => self.reorder(&source_path, &dest_path),
            DropAction::Transition { paths, target } => {
                self.transition_status(&paths, target).await;
            }
        }
        action
    }

    // ----- downstream algorithms -------------------------------------------

    /// Moves the items at `paths` to the `target` lane
    ///
    /// The new list is published before any persistence call is awaited;
    /// persistence then runs one concurrent, unordered call per affected item
    /// that has a durable id. A failed call rolls back exactly its own item
    /// and re-publishes; siblings that succeeded or are still pending are
    /// untouched. No retries.
    pub async fn transition_status(&mut self, paths: &[String], target: ReviewStatus) {
        // Resolve paths and drop the ones already in the target lane.
        let mut affected: Vec<(String, Option<String>, Option<ReviewStatus>)> = Vec::new();
        for path in paths {
            if let Some(item) = self.items.iter().find(|item| &item.path == path) {
                if item.effective_status() != target {
                    affected.push((item.path.clone(), item.id.clone(), item.status));
                }
            }
        }
        if affected.is_empty() {
            return;
        }

        // Optimistic publish, before the first await.
        let affected_paths: HashSet<&str> =
            affected.iter().map(|(path, _, _)| path.as_str()).collect();
        self.items = self
            .items
            .iter()
            .map(|item| {
                if affected_paths.contains(item.path.as_str()) {
                    let mut moved = item.clone();
                    moved.status = Some(target);
                    moved
                } else {
                    item.clone()
                }
            })
            .collect();
        (self.on_items_change)(&self.items);
        debug!(count = affected.len(), %target, "published optimistic transition");

        // One independent call per durable item; local-only items are done.
        let mut calls = JoinSet::new();
        for (path, id, prior) in affected {
            let Some(id) = id else { continue };
            let store = Arc::clone(&self.store);
            calls.spawn(async move {
                let result = store.update_status(&id, target).await;
                (path, id, prior, result)
            });
        }

        // Handle completions in whatever order they arrive.
        while let Some(joined) = calls.join_next().await {
            let Ok((path, id, prior, result)) = joined else {
                continue;
            };
            if let Err(err) = result {
                warn!(%path, %id, %err, "status update failed, rolling back item");
                self.rollback(path, id, prior, target, err.to_string());
            }
        }
    }

    /// Moves `source_path` next to `dest_path` within their shared lane
    ///
    /// Publishes on success; manual order is process-local and no store call
    /// is made.
    pub fn reorder(&mut self, source_path: &str, dest_path: &str) {
        if let Some(rebuilt) = reorder_within_lane(&self.items, source_path, dest_path) {
            self.items = rebuilt;
            (self.on_items_change)(&self.items);
        }
    }

    fn rollback(
        &mut self,
        path: String,
        id: String,
        prior: Option<ReviewStatus>,
        attempted: ReviewStatus,
        reason: String,
    ) {
        if let Some(item) = self.items.iter_mut().find(|item| item.path == path) {
            item.status = prior;
        }
        (self.on_items_change)(&self.items);

        if let Some(listener) = self.on_failure.as_mut() {
            listener(&TransitionFailure {
                path,
                id,
                attempted,
                reverted_to: prior,
                reason,
            });
        }
    }
}
