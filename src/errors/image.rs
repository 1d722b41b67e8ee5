//! Image storage error types

use thiserror::Error;

/// Errors raised while validating or persisting an uploaded image
#[derive(Error, Debug)]
pub enum ImageStoreError {
    /// File extension is not one of the accepted image types
    #[error("Unsupported image type '{0}'. Accepted: .jpeg, .jpg, .gif, .png")]
    UnsupportedType(String),

    /// Upload carried no bytes
    #[error("Uploaded image is empty")]
    Empty,

    /// Upload exceeds the configured size limit
    #[error("Image too large: {size} bytes (max {max} bytes)")]
    TooLarge {
        /// Payload size in bytes
        size: usize,
        /// Configured limit in bytes
        max: usize,
    },

    /// Writing or removing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImageStoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ImageStoreError::UnsupportedType(_) => "UNSUPPORTED_IMAGE_TYPE",
            ImageStoreError::Empty => "EMPTY_IMAGE",
            ImageStoreError::TooLarge { .. } => "IMAGE_TOO_LARGE",
            ImageStoreError::Io(_) => "IMAGE_WRITE_FAILED",
        }
    }
}
