//! Filesystem-backed asset storage.
//!
//! Stored assets are flat files in a single directory, addressed by a
//! generated name of the form `{unix_millis}-{token}.{ext}`. The millisecond
//! timestamp records creation time; the random token keeps concurrent
//! uploads from colliding within the same millisecond.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;

use crate::{Error, Result};

/// Storage abstraction for uploaded assets.
///
/// The naming strategy lives behind this trait so it can be swapped (for a
/// content-hash scheme, say) without touching request handling.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store raw bytes, returning the generated asset id (its filename).
    async fn put(&self, data: &[u8], suggested_ext: Option<&str>) -> Result<String>;

    /// Retrieve an asset's bytes by id. Returns `None` for unknown ids.
    async fn get(&self, id: &str) -> Result<Option<Vec<u8>>>;
}

/// Disk-backed [`AssetStore`] writing to a flat uploads directory.
pub struct DiskAssetStore {
    base_path: PathBuf,
}

impl DiskAssetStore {
    /// Create a new disk store rooted at `base_path`.
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the base path for storage.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Ensure the uploads directory exists.
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| Error::Internal(format!("Failed to create uploads directory: {}", e)))?;
        Ok(())
    }

    /// Path of an asset within the uploads directory.
    fn asset_path(&self, id: &str) -> PathBuf {
        self.base_path.join(id)
    }

    /// Generate a fresh asset name: millisecond timestamp plus random token.
    fn generate_name(suggested_ext: Option<&str>) -> String {
        let millis = Utc::now().timestamp_millis();
        let token = nanoid::nanoid!(8);

        match suggested_ext.map(sanitize_extension).filter(|e| !e.is_empty()) {
            Some(ext) => format!("{}-{}.{}", millis, token, ext),
            None => format!("{}-{}", millis, token),
        }
    }
}

/// An id is servable only if it names a flat file in the uploads directory.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}

/// Reduce a client-supplied extension to something safe to embed in a name.
fn sanitize_extension(ext: &str) -> String {
    ext.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(10)
        .collect::<String>()
        .to_lowercase()
}

#[async_trait]
impl AssetStore for DiskAssetStore {
    async fn put(&self, data: &[u8], suggested_ext: Option<&str>) -> Result<String> {
        self.ensure_dir().await?;

        let id = Self::generate_name(suggested_ext);
        let path = self.asset_path(&id);

        fs::write(&path, data)
            .await
            .map_err(|e| Error::Internal(format!("Failed to write file: {}", e)))?;

        tracing::debug!("Stored asset {} ({} bytes)", id, data.len());
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Vec<u8>>> {
        if !is_valid_id(id) {
            return Ok(None);
        }

        let path = self.asset_path(id);
        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Internal(format!("Failed to read file: {}", e))),
        }
    }
}
