mod models;
mod statistics;
mod store;
mod trait_def;

pub use models::{Segment, SegmentId, SegmentPage, SegmentStatistics};
pub use statistics::compute_statistics;
pub use store::{demo_segments, InMemorySegmentStore, LoadSegmentsProblem};
pub use trait_def::SegmentStore;
