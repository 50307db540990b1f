//! Shared constants for end-to-end tests
//!
//! When the demo fixture changes, update only this file.

#![allow(dead_code)]

// ============================================================================
// Demo Fixture IDs
// ============================================================================

pub const SEGMENT_1_ID: i64 = 1;
pub const SEGMENT_2_ID: i64 = 2;
pub const SEGMENT_3_ID: i64 = 3;

/// An ID not present in the demo fixture
pub const MISSING_SEGMENT_ID: i64 = 404;

pub const DEMO_SEGMENTS_COUNT: u64 = 3;

// ============================================================================
// Demo Fixture Metadata
// ============================================================================

pub const SEGMENT_1_FILENAME: &str = "segment_001.wav";
pub const SEGMENT_2_FILENAME: &str = "segment_002.wav";
pub const SEGMENT_3_FILENAME: &str = "segment_003.wav";

pub const SEGMENT_1_ORIGINAL_NAME: &str = "会议录音_片段1.wav";
pub const SEGMENT_2_ORIGINAL_NAME: &str = "客服通话_片段2.wav";
pub const SEGMENT_3_ORIGINAL_NAME: &str = "投诉电话_片段3.wav";

pub const EMOTION_VALUES: [&str; 5] = ["positive", "negative", "neutral", "surprised", "confused"];

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Number of PCM samples in generated test audio
pub const TEST_AUDIO_SAMPLES: usize = 1600;
