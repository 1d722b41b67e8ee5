//! Recipe and category error types
//!
//! ```rust
//! use recipebox::errors::RecipeError;
//!
//! let err = RecipeError::validation("name", "Name is required");
//! assert_eq!(err.field(), Some("name"));
//! ```

use thiserror::Error;

use super::ImageStoreError;

/// Errors raised by the recipe and category services
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Read or mutation against an id that does not exist
    #[error("{entity} with id '{id}' not found")]
    NotFound {
        /// Entity name ("Recipe", "Category")
        entity: &'static str,
        /// Requested identifier
        id: String,
    },

    /// Mutation invoked without an authenticated session
    #[error("You must be logged in to perform this action")]
    Unauthorized,

    /// A field failed validation
    #[error("{message}")]
    Validation {
        /// Input field name as seen by the client
        field: &'static str,
        /// Human readable message
        message: String,
    },

    /// The image store could not persist the upload
    #[error("Image upload failed: {0}")]
    Upload(#[from] ImageStoreError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl RecipeError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        RecipeError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        RecipeError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RecipeError::NotFound { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RecipeError::Unauthorized)
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, RecipeError::Validation { .. })
    }

    /// Field the error is attached to, for inline display next to that field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RecipeError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get error code for GraphQL/API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            RecipeError::NotFound { .. } => "NOT_FOUND",
            RecipeError::Unauthorized => "UNAUTHORIZED",
            RecipeError::Validation { .. } => "VALIDATION_FAILED",
            RecipeError::Upload(_) => "UPLOAD_FAILED",
            RecipeError::Database(_) => "DATABASE_ERROR",
        }
    }
}
