//! SegmentStore trait definition.
//!
//! Read access to the segment collection, shared by every request handler.

use super::models::{Segment, SegmentId, SegmentPage};
use anyhow::Result;

/// Trait for segment storage backends.
pub trait SegmentStore: Send + Sync {
    /// Get a page of segments in collection order.
    ///
    /// A `skip` past the end yields an empty page, not an error.
    fn list_segments(&self, skip: usize, limit: usize) -> Result<SegmentPage>;

    /// Get a segment by ID.
    ///
    /// IDs are expected to be unique. If they are not, the first match in
    /// collection order is returned.
    fn get_segment(&self, id: SegmentId) -> Result<Option<Segment>>;

    /// Get the number of segments in the store.
    fn get_segments_count(&self) -> usize;

    /// Get every segment, in collection order.
    fn get_all_segments(&self) -> Result<Vec<Segment>>;
}
