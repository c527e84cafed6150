//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

/// Query for fetching a stored file.
#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    /// Storage address returned by the upload endpoint
    pub hash: Option<String>,
}

/// Response for a remote address.
#[derive(Debug, Serialize)]
pub struct FetchLinkResponse {
    /// Public gateway URL for the content hash
    pub link: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Active storage backend ("remote" or "local")
    pub storage: String,
}
