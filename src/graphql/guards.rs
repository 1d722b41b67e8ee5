use async_graphql::{Context, Guard, Result};

use crate::auth::RequestContext;
use crate::graphql::errors::StructuredError;

/// Rejects the field unless the request carries a resolved user
pub struct RequireAuth;

impl Guard for RequireAuth {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        match ctx.data_opt::<RequestContext>() {
            Some(request) if request.is_authenticated() => Ok(()),
            _ => Err(StructuredError::unauthorized(
                "You must be logged in to perform this action",
            )),
        }
    }
}
