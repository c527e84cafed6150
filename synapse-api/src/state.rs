//! App state: storage gateway and config.

use std::path::PathBuf;
use std::time::Instant;

use synapse_core::constants::{
    DEFAULT_GATEWAY_URL, DEFAULT_PIN_ENDPOINT, DEFAULT_PIN_TIMEOUT_SECS, DEFAULT_UPLOAD_DIR,
    MAX_UPLOAD_BYTES,
};
use synapse_core::error::Result;
use synapse_core::types::Credentials;
use synapse_gateway::{GatewayConfig, PinningGateway};
use synapse_ipfs::PinataConfig;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Pinata credentials; `None` selects local storage.
    pub credentials: Option<Credentials>,
    /// Gateway and pinning settings.
    pub gateway: GatewayConfig,
    /// Largest accepted `file` field.
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            gateway: GatewayConfig::default(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiConfig {
    /// Load configuration from the environment and an optional `.env` file.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let credentials = Credentials::from_parts(
            std::env::var("PINATA_API_KEY").ok(),
            std::env::var("PINATA_SECRET_KEY").ok(),
        );

        let pinata = PinataConfig::default()
            .with_endpoint(
                std::env::var("PINATA_PIN_URL").unwrap_or_else(|_| DEFAULT_PIN_ENDPOINT.into()),
            )
            .with_timeout(
                std::env::var("PINATA_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_PIN_TIMEOUT_SECS),
            );

        let gateway = GatewayConfig::default()
            .with_gateway_url(
                std::env::var("PINATA_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.into()),
            )
            .with_upload_dir(
                std::env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            )
            .with_pinata(pinata);

        Self {
            credentials,
            gateway,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

/// Shared handler state.
pub struct AppState {
    /// Active configuration.
    pub config: ApiConfig,
    /// Storage façade.
    pub gateway: PinningGateway,
    /// Process start, used for uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Build state, constructing the gateway from `config`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let gateway = PinningGateway::with_config(config.gateway.clone(), config.credentials.clone())?;

        Ok(Self {
            config,
            gateway,
            started_at: Instant::now(),
        })
    }
}
