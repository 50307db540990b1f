//! Errors surfaced to API clients.

use crate::segment_store::SegmentId;
use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use super::metrics::record_api_error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Audio segment with id {0} not found")]
    SegmentNotFound(SegmentId),

    /// The segment exists but its backing file is not in storage.
    #[error("Audio file {0} not found. This is a demo API")]
    AudioFileMissing(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Not Found")]
    NoRoute,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::SegmentNotFound(_) | ApiError::AudioFileMissing(_) | ApiError::NoRoute => {
                StatusCode::NOT_FOUND
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::SegmentNotFound(_) => "segment_not_found",
            ApiError::AudioFileMissing(_) => "audio_file_missing",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::NoRoute => "no_route",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            error!("Internal error: {:#}", err);
        }
        record_api_error(self.kind());

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
