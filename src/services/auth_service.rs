use bcrypt::{hash, verify, DEFAULT_COST};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
};
use tracing::{debug, info};

use crate::auth::{CurrentUser, RequestContext};
use crate::database::entities::{user_sessions, users};
use crate::errors::{AuthError, AuthResult};

const MIN_PASSWORD_LENGTH: usize = 8;

/// A user together with a freshly issued session
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub user: users::Model,
    pub session: user_sessions::Model,
}

/// Signup, login and bearer-session resolution
#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(password: &str) -> AuthResult<String> {
        if password.is_empty() {
            return Err(AuthError::WeakPassword("password cannot be empty".to_string()));
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok(hash(password, DEFAULT_COST)?)
    }

    pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
        Ok(verify(password, hash)?)
    }

    /// Validate email format
    pub fn validate_email(email: &str) -> AuthResult<()> {
        let invalid = || AuthError::InvalidEmail(email.to_string());

        if email.is_empty() || email.len() > 254 {
            return Err(invalid());
        }

        let (local_part, domain_part) = email.split_once('@').ok_or_else(invalid)?;

        if local_part.is_empty() || domain_part.is_empty() || domain_part.contains('@') {
            return Err(invalid());
        }

        if !domain_part.contains('.') || domain_part.starts_with('.') || domain_part.ends_with('.')
        {
            return Err(invalid());
        }

        Ok(())
    }

    pub fn validate_display_name(display_name: &str) -> AuthResult<()> {
        let trimmed = display_name.trim();

        if trimmed.is_empty() {
            return Err(AuthError::InvalidDisplayName(
                "display name cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(AuthError::InvalidDisplayName(
                "display name is too long (max 100 characters)".to_string(),
            ));
        }

        Ok(())
    }

    /// Create an account and log it in
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<AuthSession> {
        let email = email.trim().to_lowercase();
        Self::validate_email(&email)?;
        Self::validate_display_name(display_name)?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = Self::hash_password(password)?;
        let user = users::ActiveModel::new(email, display_name.trim().to_string(), password_hash)
            .insert(&self.db)
            .await?;

        let session = user_sessions::ActiveModel::new(user.id.clone())
            .insert(&self.db)
            .await?;

        info!("Registered user {}", user.id);
        Ok(AuthSession { user, session })
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let email = email.trim().to_lowercase();

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let session = user_sessions::ActiveModel::new(user.id.clone())
            .insert(&self.db)
            .await?;

        info!("User {} logged in", user.id);
        Ok(AuthSession { user, session })
    }

    /// Delete the session. Returns false when it did not exist.
    pub async fn logout(&self, session_id: &str) -> AuthResult<bool> {
        let result = user_sessions::Entity::delete_by_id(session_id)
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Resolve a bearer token to its user. Expired sessions are deleted.
    pub async fn resolve_session(&self, session_id: &str) -> AuthResult<users::Model> {
        let session = user_sessions::Entity::find_by_id(session_id)
            .one(&self.db)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired() {
            session.delete(&self.db).await?;
            return Err(AuthError::SessionExpired);
        }

        users::Entity::find_by_id(session.user_id)
            .one(&self.db)
            .await?
            .ok_or(AuthError::SessionNotFound)
    }

    pub async fn find_user(&self, user_id: &str) -> AuthResult<Option<users::Model>> {
        Ok(users::Entity::find_by_id(user_id).one(&self.db).await?)
    }

    /// Request identity for an optional bearer token. Unknown or expired
    /// tokens yield an anonymous context.
    pub async fn request_context(&self, token: Option<&str>) -> AuthResult<RequestContext> {
        let Some(token) = token else {
            return Ok(RequestContext::anonymous());
        };

        match self.resolve_session(token).await {
            Ok(user) => Ok(RequestContext::authenticated(CurrentUser::from(user)).with_session(token)),
            Err(AuthError::SessionNotFound | AuthError::SessionExpired) => {
                debug!("Ignoring unknown or expired session token");
                Ok(RequestContext::anonymous())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let hash = AuthService::hash_password("correct horse").unwrap();

        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_password_validation() {
        assert!(matches!(
            AuthService::hash_password(""),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            AuthService::hash_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_email_validation() {
        assert!(AuthService::validate_email("cook@example.com").is_ok());
        assert!(AuthService::validate_email("first.last+tag@domain.co.uk").is_ok());

        assert!(AuthService::validate_email("").is_err());
        assert!(AuthService::validate_email("notanemail").is_err());
        assert!(AuthService::validate_email("@example.com").is_err());
        assert!(AuthService::validate_email("cook@").is_err());
        assert!(AuthService::validate_email("cook@localhost").is_err());
        assert!(AuthService::validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_display_name_validation() {
        assert!(AuthService::validate_display_name("Julia").is_ok());
        assert!(AuthService::validate_display_name("   ").is_err());
        assert!(AuthService::validate_display_name(&"x".repeat(101)).is_err());
    }
}
