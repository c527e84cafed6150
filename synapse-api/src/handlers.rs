//! API route handlers.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use synapse_core::constants::UPLOAD_FIELD_NAME;
use synapse_core::error::SynapseError;
use synapse_core::types::{byte_stream, ResolvedLocation, UploadResult};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// POST /api/pinata/upload
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResult>> {
    let mut multipart = multipart.map_err(|e| {
        debug!(error = %e, "Rejected upload request");
        ApiError::bad_request("file is required")
    })?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| ApiError::bad_request("file is required"))?;
    info!(filename = %filename, size = data.len(), "File received");

    if data.len() > state.config.max_upload_bytes {
        info!(size = data.len(), max = state.config.max_upload_bytes, "File too large");
        return Err(ApiError::bad_request("file too large"));
    }

    let size = data.len() as u64;
    let address = state
        .gateway
        .store(&filename, byte_stream(Cursor::new(data)))
        .await?;

    info!(address = %address, "Upload successful");

    Ok(Json(UploadResult {
        result: address,
        filename,
        size,
    }))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::bad_request("file too large")
    } else {
        ApiError::bad_request(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// GET /api/pinata/fetchHash?hash=...
pub async fn fetch_file(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FetchQuery>,
) -> Result<Response> {
    let hash = params
        .hash
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ApiError::bad_request("hash is required"))?;

    match state.gateway.resolve(&hash).await? {
        ResolvedLocation::LocalFile { path } => stream_file(&path).await,
        ResolvedLocation::Redirect { url } => Ok(Json(FetchLinkResponse { link: url }).into_response()),
    }
}

async fn stream_file(path: &Path) -> Result<Response> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(SynapseError::from)?;
    let content_length = file.metadata().await.map_err(SynapseError::from)?.len();

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("download")
        .replace('"', "'");

    let body = Body::from_stream(ReaderStream::new(file));

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_LENGTH, content_length.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let storage = if state.gateway.uses_remote() {
        "remote"
    } else {
        "local"
    };

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        storage: storage.into(),
    })
}
