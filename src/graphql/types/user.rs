use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::database::entities::users;
use crate::services::AuthSession;

#[derive(SimpleObject, Clone, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
            created_at: model.created_at,
        }
    }
}

/// Session issued by `signup` and `login`. `token` goes in the
/// `Authorization: Bearer` header of later requests.
#[derive(SimpleObject, Clone, Debug)]
pub struct AuthPayload {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl From<AuthSession> for AuthPayload {
    fn from(auth: AuthSession) -> Self {
        Self {
            token: auth.session.id,
            expires_at: auth.session.expires_at,
            user: User::from(auth.user),
        }
    }
}
