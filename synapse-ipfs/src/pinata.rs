//! Pinata client implementation.
//!
//! Pins files through `pinFileToIPFS` using API key/secret headers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tracing::{debug, instrument, warn};
use url::Url;

use synapse_core::constants::{
    DEFAULT_PIN_ENDPOINT, DEFAULT_PIN_TIMEOUT_SECS, PINATA_API_KEY_HEADER, PINATA_SECRET_HEADER,
    UPLOAD_FIELD_NAME,
};
use synapse_core::error::{Result, SynapseError};
use synapse_core::traits::PinningBackend;
use synapse_core::types::{ByteStream, Credentials};

/// Pinata client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PinataConfig {
    /// Pinning endpoint (e.g., "https://api.pinata.cloud/pinning/pinFileToIPFS")
    pub pin_endpoint: String,
    /// Request timeout in seconds, covering the whole upload
    pub timeout_seconds: u64,
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            pin_endpoint: DEFAULT_PIN_ENDPOINT.into(),
            timeout_seconds: DEFAULT_PIN_TIMEOUT_SECS,
        }
    }
}

impl PinataConfig {
    /// Overrides the pinning endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.pin_endpoint = endpoint.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Remote pin client for Pinata.
///
/// Holds one pooled `reqwest::Client`; safe to share across requests.
pub struct PinataClient {
    config: PinataConfig,
    endpoint: Url,
    http_client: reqwest::Client,
}

impl PinataClient {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(PinataConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: PinataConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.pin_endpoint).map_err(|e| {
            SynapseError::Config(format!(
                "Invalid pin endpoint '{}': {}",
                config.pin_endpoint, e
            ))
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SynapseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            endpoint,
            http_client,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &PinataConfig {
        &self.config
    }

    fn transport_error(&self, err: reqwest::Error) -> SynapseError {
        if err.is_timeout() {
            SynapseError::Transport(format!(
                "Pinning request timed out after {}s",
                self.config.timeout_seconds
            ))
        } else {
            SynapseError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl PinningBackend for PinataClient {
    #[instrument(skip(self, credentials, reader), fields(endpoint = %self.endpoint))]
    async fn upload(
        &self,
        credentials: &Credentials,
        filename: &str,
        reader: ByteStream,
    ) -> Result<String> {
        let body = reqwest::Body::wrap_stream(ReaderStream::new(reader));
        let file_part = Part::stream(body)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| SynapseError::Config(e.to_string()))?;

        let metadata = serde_json::json!({ "name": filename });
        let form = Form::new()
            .part(UPLOAD_FIELD_NAME, file_part)
            .text("pinataMetadata", metadata.to_string());

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(PINATA_API_KEY_HEADER, credentials.api_key())
            .header(PINATA_SECRET_HEADER, credentials.api_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Pinata rejected upload");
            return Err(SynapseError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let json: PinataResponse = serde_json::from_str(&text)
            .map_err(|e| SynapseError::InvalidResponse(e.to_string()))?;

        if json.ipfs_hash.trim().is_empty() {
            return Err(SynapseError::InvalidResponse("IpfsHash is empty".into()));
        }

        debug!(
            cid = %json.ipfs_hash,
            pin_size = ?json.pin_size,
            timestamp = ?json.timestamp,
            "Pinned to IPFS"
        );
        Ok(json.ipfs_hash)
    }
}

/// Pinata API response.
#[derive(Debug, Deserialize)]
struct PinataResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pin_size: Option<u64>,
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<String>,
}
