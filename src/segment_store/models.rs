//! Segment data models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type SegmentId = i64;

/// One stored unit of audio with its emotion annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    /// Name of the file inside the storage directory.
    pub filename: String,
    /// Human readable name, used as the download filename.
    pub original_name: String,
    /// Duration in seconds.
    pub duration: f64,
    pub emotion: String,
    pub confidence: f64,
    pub annotator: String,
    /// ISO-8601 creation timestamp, kept as recorded.
    pub created_at: String,
    pub file_size: u64,
    pub sample_rate: u32,
    pub channels: u16,
}

/// A window over the segment collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentPage {
    pub segments: Vec<Segment>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub has_more: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentStatistics {
    pub total_segments: usize,
    pub total_duration: f64,
    pub average_duration: f64,
    pub emotion_distribution: BTreeMap<String, usize>,
    pub completion_rate: f64,
}
