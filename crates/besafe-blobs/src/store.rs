use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

/// Raw image bytes addressed by opaque storage keys.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` under a fresh key and return the key.
    async fn save(&self, bytes: &[u8]) -> Result<String>;

    /// Read the bytes for `key`; `None` when nothing is stored there.
    async fn load(&self, key: &str) -> Option<Vec<u8>>;
}

/// Disk-backed blob store: one extension-less file per key in a flat
/// directory, created on first save. Blobs are never deleted.
pub struct ImageBlobStore {
    dir: PathBuf,
}

impl ImageBlobStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path for `key`, or `None` if the key could escape the directory.
    fn blob_path(&self, key: &str) -> Option<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return None;
        }
        Some(self.dir.join(key))
    }
}

#[async_trait]
impl BlobStore for ImageBlobStore {
    async fn save(&self, bytes: &[u8]) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create blob dir: {}", self.dir.display()))?;
        let key = Uuid::new_v4().to_string().to_uppercase();
        let Some(path) = self.blob_path(&key) else {
            bail!("generated unusable blob key {key}");
        };
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tokio::fs::remove_file(&path)
                .await
                .with_context(|| format!("replace blob: {}", path.display()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("write blob: {}", path.display()))?;
        debug!(%key, size = bytes.len(), "stored blob");
        Ok(key)
    }

    async fn load(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.blob_path(key)?;
        tokio::fs::read(&path).await.ok()
    }
}
