//! Error types for Synapse.
//!
//! One error enum is shared by every storage component so the HTTP edge can
//! map failures to status codes in a single place.

use thiserror::Error;

/// Result type alias using `SynapseError`.
pub type Result<T> = std::result::Result<T, SynapseError>;

/// Main error type for all Synapse storage operations.
#[derive(Debug, Error)]
pub enum SynapseError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CALLER ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed (missing upload field, empty address, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A local address points at a file that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // REMOTE PINNING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The pinning service could not be reached, or the call timed out.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The pinning service answered with a non-2xx status.
    #[error("Upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The pinning service answered 2xx but the body carried no usable hash.
    #[error("Invalid pinning response: {0}")]
    InvalidResponse(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // LOCAL STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SynapseError {
    /// Returns true if the failure happened while talking to the pinning service.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            SynapseError::Transport(_)
                | SynapseError::Upstream { .. }
                | SynapseError::InvalidResponse(_)
        )
    }

    /// Returns true if the caller is at fault (4xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(self, SynapseError::Validation(_) | SynapseError::NotFound(_))
    }
}
