//! Aggregate statistics over a segment collection.

use super::models::{Segment, SegmentStatistics};
use std::collections::BTreeMap;

/// Every segment in the collection carries a label.
const COMPLETION_RATE: f64 = 100.0;

/// Halves round to even.
fn round_2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Computes the statistics snapshot. An empty collection yields zeros.
pub fn compute_statistics(segments: &[Segment]) -> SegmentStatistics {
    let mut emotion_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_duration = 0.0;

    for segment in segments {
        *emotion_distribution
            .entry(segment.emotion.clone())
            .or_insert(0) += 1;
        total_duration += segment.duration;
    }

    let average_duration = if segments.is_empty() {
        0.0
    } else {
        total_duration / segments.len() as f64
    };

    SegmentStatistics {
        total_segments: segments.len(),
        total_duration: round_2(total_duration),
        average_duration: round_2(average_duration),
        emotion_distribution,
        completion_rate: COMPLETION_RATE,
    }
}
