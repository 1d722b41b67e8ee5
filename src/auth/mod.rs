use crate::database::entities::users;
use crate::errors::{RecipeError, RecipeResult};

/// Identity resolved from a valid session
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

impl From<users::Model> for CurrentUser {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
        }
    }
}

/// Per-request identity handed to every service call
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestContext {
    pub current_user: Option<CurrentUser>,
    /// Raw bearer token the identity was resolved from
    pub session_id: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: CurrentUser) -> Self {
        Self {
            current_user: Some(user),
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.current_user.as_ref().map(|user| user.id.as_str())
    }

    /// Fails with [`RecipeError::Unauthorized`] for anonymous requests
    pub fn require_user(&self) -> RecipeResult<&CurrentUser> {
        self.current_user.as_ref().ok_or(RecipeError::Unauthorized)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
