//! # Caseboard Core
//!
//! Workflow board drag-and-drop engine for case-file review tools.
//!
//! This crate turns pointer gestures into cross-lane status transitions with
//! optimistic persistence and per-item rollback, and into intra-lane manual
//! reordering, without any dependency on specific UI implementations or
//! storage backends. Selection state and status persistence are supplied by
//! the host through the [`SelectionModel`] and [`StatusStore`] traits.

pub mod board;
pub mod domain;
pub mod error;
pub mod selection;
pub mod store;

// Re-export commonly used types
pub use board::{
    BoardController, DeselectCoordinator, DragStateMachine, DropAction, DropTarget,
    TransitionFailure,
};
pub use domain::{lanes, Lane, ReviewStatus, WorkItem, CANONICAL_LANES};
pub use error::{BoardError, Result};
pub use selection::{IndexSelection, SelectionModel};
pub use store::StatusStore;
