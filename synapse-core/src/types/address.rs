//! Storage addresses.
//!
//! - [`StorageAddress`]: the identifier handed back to clients after an upload
//! - [`ResolvedLocation`]: where a previously issued address can be read from

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::LOCAL_ADDRESS_PREFIX;
use crate::error::{Result, SynapseError};

// ═══════════════════════════════════════════════════════════════════════════════
// STORAGE ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifier of a stored file.
///
/// The string form is what clients see:
/// - `Remote`: the raw content hash (`QmABC...`), no prefix
/// - `Local`: `local:` followed by a filesystem path
///
/// The `local:` prefix is the only discriminator. Every conversion from a
/// string goes through [`StorageAddress::parse`].
///
/// # Example
/// ```
/// use synapse_core::StorageAddress;
///
/// let addr: StorageAddress = "local:uploads/1700000000-report.csv".parse().unwrap();
/// assert!(addr.is_local());
/// assert_eq!(addr.to_string(), "local:uploads/1700000000-report.csv");
///
/// let addr: StorageAddress = "QmABC".parse().unwrap();
/// assert_eq!(addr.as_hash(), Some("QmABC"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StorageAddress {
    /// Content hash issued by the pinning service.
    Remote {
        /// IPFS CID
        hash: String,
    },
    /// File written by the local fallback store.
    Local {
        /// Path of the stored file
        path: PathBuf,
    },
}

impl StorageAddress {
    /// Creates a remote address from a content hash.
    pub fn remote(hash: impl Into<String>) -> Self {
        Self::Remote { hash: hash.into() }
    }

    /// Creates a local address from a file path.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local { path: path.into() }
    }

    /// Parses the string form of an address.
    ///
    /// Fails on an empty string and on a bare `local:` with no path.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(SynapseError::Validation("address cannot be empty".into()));
        }

        match s.strip_prefix(LOCAL_ADDRESS_PREFIX) {
            Some("") => Err(SynapseError::Validation(
                "local address has no path".into(),
            )),
            Some(path) => Ok(Self::local(path)),
            None => Ok(Self::remote(s)),
        }
    }

    /// Returns true for addresses produced by the local fallback store.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }

    /// Returns the content hash of a remote address.
    pub fn as_hash(&self) -> Option<&str> {
        match self {
            Self::Remote { hash } => Some(hash),
            Self::Local { .. } => None,
        }
    }

    /// Returns the file path of a local address.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Remote { .. } => None,
            Self::Local { path } => Some(path),
        }
    }
}

impl fmt::Display for StorageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { hash } => f.write_str(hash),
            Self::Local { path } => write!(f, "{}{}", LOCAL_ADDRESS_PREFIX, path.display()),
        }
    }
}

impl FromStr for StorageAddress {
    type Err = SynapseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for StorageAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StorageAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVED LOCATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Where the bytes behind a [`StorageAddress`] can be fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedLocation {
    /// An existing file on local disk, to be streamed back.
    LocalFile {
        /// Path of the file
        path: PathBuf,
    },
    /// A public gateway URL the client should follow.
    Redirect {
        /// Gateway URL (`<gateway>/ipfs/<hash>`)
        url: String,
    },
}
