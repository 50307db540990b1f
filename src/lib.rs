//! Emotion Annotation Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod emotion;
pub mod segment_store;
pub mod server;

// Re-export commonly used types for convenience
pub use segment_store::{InMemorySegmentStore, Segment, SegmentStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
