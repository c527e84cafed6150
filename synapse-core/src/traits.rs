//! Common traits for Synapse.
//!
//! The remote pinning call sits behind [`PinningBackend`] so the gateway can
//! be driven by a fake in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ByteStream, Credentials};

// ═══════════════════════════════════════════════════════════════════════════════
// PINNING BACKEND
// ═══════════════════════════════════════════════════════════════════════════════

/// A content-pinning service.
///
/// Implementations might use:
/// - Pinata's `pinFileToIPFS` endpoint (production)
/// - An in-memory fake (tests)
#[async_trait]
pub trait PinningBackend: Send + Sync {
    /// Uploads `reader` under `filename` and returns the issued content hash.
    ///
    /// `filename` is already sanitized. Credentials are passed per call so
    /// the owner decides on every upload whether a remote call happens at all.
    async fn upload(
        &self,
        credentials: &Credentials,
        filename: &str,
        reader: ByteStream,
    ) -> Result<String>;
}
