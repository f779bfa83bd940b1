pub mod item;
pub mod lane;

pub use item::{ReviewStatus, WorkItem};
pub use lane::{lane_paths, lane_rank, lanes, Lane, CANONICAL_LANES};
