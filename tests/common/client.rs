//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all annotation-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server, including any API prefix
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Service Endpoints
    // ========================================================================

    /// GET /
    pub async fn get_root(&self) -> Response {
        self.get("/").await
    }

    /// GET /health
    pub async fn get_health(&self) -> Response {
        self.get("/health").await
    }

    // ========================================================================
    // Segment Endpoints
    // ========================================================================

    /// GET /audio-segments with optional pagination
    pub async fn list_segments(&self, skip: Option<usize>, limit: Option<usize>) -> Response {
        let mut query = Vec::new();
        if let Some(skip) = skip {
            query.push(("skip", skip));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit));
        }
        self.client
            .get(format!("{}/audio-segments", self.base_url))
            .query(&query)
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /audio-segments?{raw_query}, for malformed parameters
    pub async fn list_segments_raw(&self, raw_query: &str) -> Response {
        self.get(&format!("/audio-segments?{}", raw_query)).await
    }

    /// GET /audio-segments/{id}
    pub async fn get_segment(&self, id: i64) -> Response {
        self.get(&format!("/audio-segments/{}", id)).await
    }

    /// GET /audio-segments/{raw_id}, for ids that are not integers
    pub async fn get_segment_raw(&self, raw_id: &str) -> Response {
        self.get(&format!("/audio-segments/{}", raw_id)).await
    }

    /// GET /audio-segments/{id}/file
    pub async fn get_segment_file(&self, id: i64) -> Response {
        self.get(&format!("/audio-segments/{}/file", id)).await
    }

    // ========================================================================
    // Reference Data Endpoints
    // ========================================================================

    /// GET /emotions
    pub async fn get_emotions(&self) -> Response {
        self.get("/emotions").await
    }

    /// GET /statistics
    pub async fn get_statistics(&self) -> Response {
        self.get("/statistics").await
    }
}
