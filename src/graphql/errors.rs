use async_graphql::*;

use crate::errors::{AuthError, RecipeError, ToGraphQLError};

/// Structured error builder for errors raised in the GraphQL layer itself
pub struct StructuredError;

impl StructuredError {
    /// Create an "unauthorized" error
    pub fn unauthorized(message: impl Into<String>) -> Error {
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "UNAUTHORIZED");
        })
    }

    /// Create a "bad request" error
    pub fn bad_request(message: impl Into<String>) -> Error {
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "BAD_REQUEST");
        })
    }
}

pub fn recipe_error_to_graphql_error(err: RecipeError) -> Error {
    err.to_graphql_error()
}

pub fn auth_error_to_graphql_error(err: AuthError) -> Error {
    err.to_graphql_error()
}
