//! Domain error types for recipebox
//!
//! # Error Categories
//!
//! - **RecipeError**: recipe and category operations (not found, validation,
//!   authorization, upload and database failures)
//! - **AuthError**: signup, login and session resolution
//! - **ImageStoreError**: image validation and storage I/O
//!
//! Every error type exposes an `error_code()` used as the `code` extension
//! on GraphQL errors (see [`ToGraphQLError`]).
//!
//! ```rust
//! use recipebox::errors::RecipeError;
//!
//! let err = RecipeError::not_found("Recipe", "r1");
//! assert!(err.is_not_found());
//! assert_eq!(err.error_code(), "NOT_FOUND");
//! ```

pub mod auth;
pub mod common;
pub mod image;
pub mod recipe;

pub use auth::AuthError;
pub use common::ToGraphQLError;
pub use image::ImageStoreError;
pub use recipe::RecipeError;

/// Result type alias for recipe and category operations
pub type RecipeResult<T> = Result<T, RecipeError>;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type alias for image storage operations
pub type ImageStoreResult<T> = Result<T, ImageStoreError>;
