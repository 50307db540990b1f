//! In-memory SegmentStore implementation.

use super::models::{Segment, SegmentId, SegmentPage};
use super::trait_def::SegmentStore;
use crate::emotion::is_known_emotion;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Issues found while building a store. None of them prevent the store from
/// being built.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSegmentsProblem {
    DuplicateId(SegmentId),
    UnknownEmotion { id: SegmentId, emotion: String },
}

fn find_problems(segments: &[Segment]) -> Vec<LoadSegmentsProblem> {
    let mut problems = vec![];
    let mut seen_ids = HashSet::new();
    for segment in segments {
        if !seen_ids.insert(segment.id) {
            problems.push(LoadSegmentsProblem::DuplicateId(segment.id));
        }
        if !is_known_emotion(&segment.emotion) {
            problems.push(LoadSegmentsProblem::UnknownEmotion {
                id: segment.id,
                emotion: segment.emotion.clone(),
            });
        }
    }
    problems
}

/// A fixed segment collection held in memory for the whole process lifetime.
pub struct InMemorySegmentStore {
    segments: Vec<Segment>,
    problems: Vec<LoadSegmentsProblem>,
}

impl InMemorySegmentStore {
    pub fn new(segments: Vec<Segment>) -> Self {
        let problems = find_problems(&segments);
        if !problems.is_empty() {
            warn!("Found {} problems in segments:", problems.len());
            for problem in problems.iter() {
                warn!("- {:?}", problem);
            }
        }
        InMemorySegmentStore { segments, problems }
    }

    pub fn with_demo_fixture() -> Self {
        Self::new(demo_segments())
    }

    /// Loads the collection from a JSON file holding an array of segments.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read segments file: {:?}", path))?;
        let segments: Vec<Segment> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse segments file: {:?}", path))?;
        info!("Loaded {} segments from {:?}", segments.len(), path);
        Ok(Self::new(segments))
    }

    pub fn problems(&self) -> &[LoadSegmentsProblem] {
        &self.problems
    }
}

impl SegmentStore for InMemorySegmentStore {
    fn list_segments(&self, skip: usize, limit: usize) -> Result<SegmentPage> {
        let total = self.segments.len();
        let segments = self
            .segments
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();

        Ok(SegmentPage {
            segments,
            total,
            skip,
            limit,
            has_more: skip.saturating_add(limit) < total,
        })
    }

    fn get_segment(&self, id: SegmentId) -> Result<Option<Segment>> {
        Ok(self.segments.iter().find(|s| s.id == id).cloned())
    }

    fn get_segments_count(&self) -> usize {
        self.segments.len()
    }

    fn get_all_segments(&self) -> Result<Vec<Segment>> {
        Ok(self.segments.clone())
    }
}
#[allow(clippy::too_many_arguments)]
fn demo_segment(
    id: SegmentId,
    original_name: &str,
    duration: f64,
    emotion: &str,
    confidence: f64,
    annotator: &str,
    created_at: &str,
    file_size: u64,
) -> Segment {
    Segment {
        id,
        filename: format!("segment_{:03}.wav", id),
        original_name: original_name.to_string(),
        duration,
        emotion: emotion.to_string(),
        confidence,
        annotator: annotator.to_string(),
        created_at: created_at.to_string(),
        file_size,
        sample_rate: 16000,
        channels: 1,
    }
}

/// The built-in demo collection served when no segments file is configured.
pub fn demo_segments() -> Vec<Segment> {
    vec![
        demo_segment(
            1,
            "会议录音_片段1.wav",
            5.2,
            "neutral",
            0.8,
            "user1",
            "2024-01-01T10:00:00",
            256000,
        ),
        demo_segment(
            2,
            "客服通话_片段2.wav",
            3.8,
            "positive",
            0.9,
            "user2",
            "2024-01-01T11:00:00",
            187200,
        ),
        demo_segment(
            3,
            "投诉电话_片段3.wav",
            7.1,
            "negative",
            0.95,
            "user1",
            "2024-01-01T12:00:00",
            350400,
        ),
    ]
}
