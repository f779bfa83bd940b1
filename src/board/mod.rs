pub mod controller;
pub mod deselect;
pub mod reorder;
pub mod session;

pub use controller::{BoardController, FailureListener, PublishListener, TransitionFailure};
pub use deselect::DeselectCoordinator;
pub use reorder::reorder_within_lane;
pub use session::{DragSession, DragSource, DragStateMachine, DropAction, DropTarget};
