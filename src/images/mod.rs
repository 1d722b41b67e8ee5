//! Recipe image storage
//!
//! Uploaded images are written beneath a base directory and referenced by a
//! relative path such as `uploads/recipe-images/<uuid>.png`. The same path
//! is stored in `recipes.image_url` and rewritten to the public
//! `recipe-photos` prefix when building display URLs (see [`paths`]).

pub mod local;
pub mod paths;

use async_trait::async_trait;

use crate::errors::{ImageStoreError, ImageStoreResult};

pub use local::LocalImageStore;
pub use paths::{accepted_extension, display_url, is_uploaded_image, public_url};

/// Folder (relative to the store's base directory) holding recipe images
pub const RECIPE_IMAGE_FOLDER: &str = "uploads/recipe-images";

/// Public URL segment under which [`RECIPE_IMAGE_FOLDER`] is served
pub const RECIPE_IMAGE_PUBLIC_PREFIX: &str = "recipe-photos";

/// Default upload limit, 5 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Raw uploaded file as received from the client
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lowercased accepted extension of the original filename
    pub fn extension(&self) -> ImageStoreResult<&'static str> {
        accepted_extension(&self.filename)
            .ok_or_else(|| ImageStoreError::UnsupportedType(self.filename.clone()))
    }

    /// Check the upload against the accepted types and a size limit
    pub fn validate(&self, max_bytes: usize) -> ImageStoreResult<&'static str> {
        let extension = self.extension()?;

        if self.bytes.is_empty() {
            return Err(ImageStoreError::Empty);
        }

        if self.bytes.len() > max_bytes {
            return Err(ImageStoreError::TooLarge {
                size: self.bytes.len(),
                max: max_bytes,
            });
        }

        Ok(extension)
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Persists uploaded images and hands back a stable relative path
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `upload` under `folder`, returning `"{folder}/{file}"`
    async fn save(&self, upload: &ImageUpload, folder: &str) -> ImageStoreResult<String>;

    /// Remove a previously stored file by the path `save` returned
    async fn remove(&self, path: &str) -> ImageStoreResult<()>;
}
