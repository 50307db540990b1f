use axum::extract::FromRef;

use crate::segment_store::SegmentStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedSegmentStore = Arc<dyn SegmentStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub segment_store: GuardedSegmentStore,
}

impl ServerState {
    pub fn new(config: ServerConfig, segment_store: GuardedSegmentStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            segment_store,
        }
    }
}

impl FromRef<ServerState> for GuardedSegmentStore {
    fn from_ref(input: &ServerState) -> Self {
        input.segment_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
