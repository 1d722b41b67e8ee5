use async_graphql::*;

use crate::graphql::context::{request_context, GraphQLContext};
use crate::graphql::errors::auth_error_to_graphql_error;
use crate::graphql::guards::RequireAuth;
use crate::graphql::types::AuthPayload;

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Register a new user and start a session
    async fn signup(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        display_name: String,
    ) -> Result<AuthPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let auth = context
            .auth_service
            .signup(&email, &password, &display_name)
            .await
            .map_err(auth_error_to_graphql_error)?;

        Ok(AuthPayload::from(auth))
    }

    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        let auth = context
            .auth_service
            .login(&email, &password)
            .await
            .map_err(auth_error_to_graphql_error)?;

        Ok(AuthPayload::from(auth))
    }

    /// End the session the request was authenticated with
    #[graphql(guard = "RequireAuth")]
    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        let context = ctx.data::<GraphQLContext>()?;
        let Some(session_id) = request_context(ctx).session_id else {
            return Ok(false);
        };

        context
            .auth_service
            .logout(&session_id)
            .await
            .map_err(auth_error_to_graphql_error)
    }
}
