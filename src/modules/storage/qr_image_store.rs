use std::path::{Path, PathBuf};

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::QR_IMAGE_URL_PREFIX;

/// Filesystem store for generated QR images, keyed by public id.
///
/// Each image lives at `<root>/<public_id>.png` and is addressable over
/// HTTP at a stable URL derived from the same key.
pub struct QrImageStore {
    root: PathBuf,
}

impl QrImageStore {
    /// Create the store, ensuring the backing directory exists
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        tokio::fs::create_dir_all(&config.qr_image_dir)
            .await
            .map_err(|e| {
                AppError::Internal(format!(
                    "Failed to create QR image directory {}: {}",
                    config.qr_image_dir.display(),
                    e
                ))
            })?;

        Ok(Self {
            root: config.qr_image_dir.clone(),
        })
    }

    fn image_path(&self, public_id: &str) -> PathBuf {
        self.root.join(format!("{}.png", public_id))
    }

    /// Persist PNG bytes for a public id, replacing any previous image
    pub async fn save(&self, public_id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.image_path(public_id);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            tracing::error!("Failed to write QR image {}: {}", path.display(), e);
            AppError::Internal("Failed to persist QR image".to_string())
        })
    }

    /// Read back the PNG for a public id, `None` if it was never stored
    pub async fn load(&self, public_id: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.image_path(public_id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!("Failed to read QR image for {}: {}", public_id, e);
                Err(AppError::Internal("Failed to read QR image".to_string()))
            }
        }
    }

    /// Stable public URL path for a stored image
    pub fn public_url(&self, public_id: &str) -> String {
        format!("{}/{}.png", QR_IMAGE_URL_PREFIX, public_id)
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
