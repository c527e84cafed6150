//! Pinning gateway: picks the storage backend and resolves addresses.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use synapse_core::constants::{DEFAULT_GATEWAY_URL, DEFAULT_UPLOAD_DIR};
use synapse_core::error::{Result, SynapseError};
use synapse_core::traits::PinningBackend;
use synapse_core::types::{
    sanitize_filename, ByteStream, Credentials, ResolvedLocation, StorageAddress,
};
use synapse_ipfs::{PinataClient, PinataConfig};
use synapse_local::LocalFallbackStore;

/// Gateway configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Public gateway used for redirect links (e.g., "https://gateway.pinata.cloud")
    pub gateway_url: String,
    /// Directory for the local fallback store
    pub upload_dir: PathBuf,
    /// Pinata client settings
    pub pinata: PinataConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.into(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            pinata: PinataConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Overrides the public gateway URL.
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    /// Overrides the local upload directory.
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// Overrides the Pinata client settings.
    pub fn with_pinata(mut self, pinata: PinataConfig) -> Self {
        self.pinata = pinata;
        self
    }
}

/// Façade used by the HTTP handlers.
///
/// Uploads go to the pinning backend when credentials are configured and to
/// the local fallback store otherwise. The check happens on every call.
/// Nothing is retried.
pub struct PinningGateway {
    credentials: Option<Credentials>,
    gateway_url: String,
    remote: Arc<dyn PinningBackend>,
    local: LocalFallbackStore,
}

impl PinningGateway {
    /// Creates a gateway from explicit parts.
    pub fn new(
        credentials: Option<Credentials>,
        gateway_url: impl Into<String>,
        remote: Arc<dyn PinningBackend>,
        local: LocalFallbackStore,
    ) -> Self {
        Self {
            credentials,
            gateway_url: gateway_url.into().trim_end_matches('/').to_string(),
            remote,
            local,
        }
    }

    /// Creates a gateway backed by Pinata and a local store from `config`.
    pub fn with_config(config: GatewayConfig, credentials: Option<Credentials>) -> Result<Self> {
        let remote = PinataClient::with_config(config.pinata)?;
        Ok(Self::new(
            credentials,
            config.gateway_url,
            Arc::new(remote),
            LocalFallbackStore::new(config.upload_dir),
        ))
    }

    /// Replaces the credentials; the next `store` call follows the new value.
    pub fn set_credentials(&mut self, credentials: Option<Credentials>) {
        self.credentials = credentials;
    }

    /// Returns true if uploads currently go to the pinning service.
    pub fn uses_remote(&self) -> bool {
        self.credentials.is_some()
    }

    /// Returns the local fallback store.
    pub fn local_store(&self) -> &LocalFallbackStore {
        &self.local
    }

    /// Builds the public gateway link for a content hash.
    pub fn gateway_link(&self, hash: &str) -> String {
        format!("{}/ipfs/{}", self.gateway_url, hash)
    }

    /// Stores `reader` under `filename` and returns its address.
    #[instrument(skip(self, reader))]
    pub async fn store(&self, filename: &str, reader: ByteStream) -> Result<StorageAddress> {
        let name = sanitize_filename(filename);

        let address = match &self.credentials {
            Some(credentials) => {
                let hash = self
                    .remote
                    .upload(credentials, &name, reader)
                    .await
                    .map_err(|e| {
                        error!(error = %e, "Remote pinning failed");
                        e
                    })?;
                StorageAddress::remote(hash)
            }
            None => {
                debug!("No pinning credentials, using local fallback store");
                let path = self.local.store(&name, reader).await?;
                StorageAddress::local(path)
            }
        };

        info!(address = %address, "Stored upload");
        Ok(address)
    }

    /// Resolves the string form of an address.
    pub async fn resolve(&self, address: &str) -> Result<ResolvedLocation> {
        let address = StorageAddress::parse(address)?;
        self.resolve_address(&address).await
    }

    /// Resolves a parsed address.
    ///
    /// Local addresses must point at an existing file inside the upload
    /// directory. Remote addresses always resolve to a gateway link; the hash
    /// is not checked against the pinning service.
    #[instrument(skip(self), fields(address = %address))]
    pub async fn resolve_address(&self, address: &StorageAddress) -> Result<ResolvedLocation> {
        match address {
            StorageAddress::Local { path } => self.resolve_local(path).await,
            StorageAddress::Remote { hash } => Ok(ResolvedLocation::Redirect {
                url: self.gateway_link(hash),
            }),
        }
    }

    async fn resolve_local(&self, path: &Path) -> Result<ResolvedLocation> {
        if !self.local.contains(path).await {
            debug!(path = ?path, "Local address does not resolve");
            return Err(SynapseError::NotFound(format!(
                "local file not found: {}",
                path.display()
            )));
        }

        Ok(ResolvedLocation::LocalFile {
            path: path.to_path_buf(),
        })
    }
}
