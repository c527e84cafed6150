//! Pinning service credentials.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Pinata API key/secret pair.
///
/// Only exists when both halves are present; an absent `Credentials` is what
/// routes uploads to the local fallback store. The secret is wiped on drop
/// and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Creates credentials from a key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Builds credentials only if both values are present and non-blank.
    pub fn from_parts(api_key: Option<String>, api_secret: Option<String>) -> Option<Self> {
        match (api_key, api_secret) {
            (Some(key), Some(secret)) if !key.trim().is_empty() && !secret.trim().is_empty() => {
                Some(Self::new(key.trim(), secret.trim()))
            }
            _ => None,
        }
    }

    /// API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API secret.
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_both() {
        assert!(Credentials::from_parts(Some("key".into()), Some("secret".into())).is_some());
        assert!(Credentials::from_parts(Some("key".into()), None).is_none());
        assert!(Credentials::from_parts(None, Some("secret".into())).is_none());
        assert!(Credentials::from_parts(None, None).is_none());
    }

    #[test]
    fn test_from_parts_rejects_blank() {
        assert!(Credentials::from_parts(Some("key".into()), Some("  ".into())).is_none());
        assert!(Credentials::from_parts(Some("".into()), Some("secret".into())).is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("my_key", "my_secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("my_key"));
        assert!(!printed.contains("my_secret"));
    }
}
