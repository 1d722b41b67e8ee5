//! Authentication error types
//!
//! ```rust
//! use recipebox::errors::AuthError;
//!
//! let err = AuthError::InvalidCredentials;
//! assert!(err.is_authentication_error());
//! ```

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid credentials provided
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session token unknown
    #[error("Session not found")]
    SessionNotFound,

    /// Session has expired
    #[error("Session expired")]
    SessionExpired,

    /// Invalid email format
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Invalid display name
    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// User already exists
    #[error("User already exists")]
    UserAlreadyExists,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AuthError {
    /// Check if this is an authentication error (401)
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::SessionNotFound
                | AuthError::SessionExpired
        )
    }

    /// Check if this is a validation error (400)
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidEmail(_)
                | AuthError::InvalidDisplayName(_)
                | AuthError::WeakPassword(_)
        )
    }

    /// Get error code for GraphQL/API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::SessionNotFound => "SESSION_NOT_FOUND",
            AuthError::SessionExpired => "SESSION_EXPIRED",
            AuthError::InvalidEmail(_) => "INVALID_EMAIL",
            AuthError::InvalidDisplayName(_) => "INVALID_DISPLAY_NAME",
            AuthError::WeakPassword(_) => "WEAK_PASSWORD",
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::Hashing(_) => "INTERNAL_ERROR",
            AuthError::Database(_) => "DATABASE_ERROR",
        }
    }
}
