use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{ImageStore, ImageUpload, DEFAULT_MAX_UPLOAD_BYTES};
use crate::errors::{ImageStoreError, ImageStoreResult};

/// Image store backed by a directory on the local filesystem
#[derive(Clone, Debug)]
pub struct LocalImageStore {
    base_dir: PathBuf,
    max_bytes: usize,
}

impl LocalImageStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Absolute location of a stored relative path
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, upload: &ImageUpload, folder: &str) -> ImageStoreResult<String> {
        let extension = upload.validate(self.max_bytes)?;

        let dir = self.base_dir.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;

        let relative = format!("{}/{}", folder.trim_end_matches('/'), file_name);
        debug!(
            "Stored image '{}' ({} bytes) as {}",
            upload.filename,
            upload.bytes.len(),
            relative
        );
        Ok(relative)
    }

    async fn remove(&self, path: &str) -> ImageStoreResult<()> {
        if path.split('/').any(|segment| segment == "..") {
            return Err(ImageStoreError::UnsupportedType(path.to_string()));
        }

        tokio::fs::remove_file(self.resolve(path)).await?;
        Ok(())
    }
}
