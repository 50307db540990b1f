//! Audio file retrieval for segments

use super::{error::ApiError, state::ServerState};
use crate::segment_store::SegmentId;
use anyhow::Context;
use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::Response,
};

use std::path::{Component, Path as FsPath};
use tokio::{fs::File, io::BufReader};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

const AUDIO_CONTENT_TYPE: &str = "audio/wav";
const READ_BUFFER_CAPACITY: usize = 4096 * 16;

/// Builds a `Content-Disposition` value suggesting `filename` for the
/// download. Non-ASCII names use the RFC 5987 extended form.
pub(super) fn content_disposition(filename: &str) -> String {
    let is_plain = filename
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\');
    if is_plain {
        format!("attachment; filename=\"{}\"", filename)
    } else {
        format!(
            "attachment; filename*=utf-8''{}",
            urlencoding::encode(filename)
        )
    }
}

/// A filename is servable only when it stays inside the storage directory.
pub(super) fn is_within_storage(filename: &str) -> bool {
    let path = FsPath::new(filename);
    !filename.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

pub async fn get_segment_file(
    State(state): State<ServerState>,
    id: Result<Path<SegmentId>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;

    let segment = state
        .segment_store
        .get_segment(id)?
        .ok_or(ApiError::SegmentNotFound(id))?;

    if !is_within_storage(&segment.filename) {
        warn!(
            "Segment {} filename {:?} escapes the storage directory",
            id, segment.filename
        );
        return Err(ApiError::AudioFileMissing(segment.filename));
    }

    let path = state.config.storage_path.join(&segment.filename);
    debug!("Serving segment {} from path {}", id, path.display());

    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("Segment {} audio file not available", id);
            return Err(ApiError::AudioFileMissing(segment.filename));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to open {}", path.display()))
                .into())
        }
    };

    let metadata = file
        .metadata()
        .await
        .with_context(|| format!("Failed to stat {}", path.display()))?;
    if !metadata.is_file() {
        return Err(ApiError::AudioFileMissing(segment.filename));
    }

    let file_reader = BufReader::with_capacity(READ_BUFFER_CAPACITY, file);
    let stream = ReaderStream::with_capacity(file_reader, READ_BUFFER_CAPACITY);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&segment.original_name),
        )
        .body(Body::from_stream(stream))
        .map_err(|err| ApiError::Internal(err.into()))
}
