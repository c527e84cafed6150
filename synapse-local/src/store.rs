//! Local fallback store.
//!
//! Writes uploads into a single flat directory. Files are named
//! `<nanosecond-timestamp>-<sanitized-filename>`; there is no index, the
//! returned path is the only record of where a file lives.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use synapse_core::error::{Result, SynapseError};
use synapse_core::types::{sanitize_filename, ByteStream};

/// Disk-backed store used when no pinning credentials are configured.
#[derive(Clone, Debug)]
pub struct LocalFallbackStore {
    base_dir: PathBuf,
}

impl LocalFallbackStore {
    /// Creates a store rooted at `base_dir`.
    ///
    /// The directory is created lazily on the first upload.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Streams `reader` into a new file and returns its path.
    ///
    /// A failure halfway through leaves the truncated file in place.
    #[instrument(skip(self, reader), fields(base_dir = ?self.base_dir))]
    pub async fn store(&self, filename: &str, mut reader: ByteStream) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir).await.map_err(|e| {
            SynapseError::Io(io::Error::new(
                e.kind(),
                format!(
                    "Failed to create upload directory {}: {}",
                    self.base_dir.display(),
                    e
                ),
            ))
        })?;

        let name = format!("{}-{}", timestamp_token(), sanitize_filename(filename));
        let path = self.base_dir.join(name);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let written = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;

        debug!(path = ?path, bytes = written, "Stored upload on local disk");
        Ok(path)
    }

    /// Returns true if `path` is an existing regular file inside the base directory.
    pub async fn contains(&self, path: &Path) -> bool {
        let (Ok(base), Ok(target)) = (
            fs::canonicalize(&self.base_dir).await,
            fs::canonicalize(path).await,
        ) else {
            return false;
        };

        if !target.starts_with(&base) {
            return false;
        }

        fs::metadata(&target)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

/// High-resolution uniqueness token for stored file names.
fn timestamp_token() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros())
}
