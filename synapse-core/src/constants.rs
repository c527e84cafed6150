//! Service constants for Synapse.

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESSING
// ═══════════════════════════════════════════════════════════════════════════════

/// Prefix that marks a storage address as a local file path.
pub const LOCAL_ADDRESS_PREFIX: &str = "local:";

/// Name used when a sanitized upload filename ends up empty.
pub const FALLBACK_FILENAME: &str = "upload";

// ═══════════════════════════════════════════════════════════════════════════════
// PINATA
// ═══════════════════════════════════════════════════════════════════════════════

/// Public gateway used to build redirect links for remote addresses.
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud";

/// Pinata v1 file pinning endpoint.
pub const DEFAULT_PIN_ENDPOINT: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

/// Header carrying the Pinata API key.
pub const PINATA_API_KEY_HEADER: &str = "pinata_api_key";

/// Header carrying the Pinata API secret.
pub const PINATA_SECRET_HEADER: &str = "pinata_secret_api_key";

/// Default timeout for a single pinning call, in seconds.
pub const DEFAULT_PIN_TIMEOUT_SECS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// UPLOADS
// ═══════════════════════════════════════════════════════════════════════════════

/// Largest upload the HTTP surface accepts (100 MiB).
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Default directory for the local fallback store.
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Multipart form field carrying the uploaded file.
pub const UPLOAD_FIELD_NAME: &str = "file";
