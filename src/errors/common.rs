//! Conversion of domain errors to GraphQL errors with structured extensions

use async_graphql::{Error as GraphQLError, ErrorExtensions};

use super::*;

/// Convert domain errors to GraphQL errors with error codes
pub trait ToGraphQLError {
    /// Convert to GraphQL error with structured extensions
    fn to_graphql_error(&self) -> GraphQLError;
}

impl ToGraphQLError for RecipeError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        let message = self.to_string();

        GraphQLError::new(message).extend_with(|_, e| {
            e.set("code", code);

            match self {
                RecipeError::NotFound { entity, id } => {
                    e.set("resource", *entity);
                    e.set("id", id.as_str());
                }
                RecipeError::Validation { field, .. } => {
                    e.set("field", *field);
                }
                RecipeError::Upload(inner) => {
                    e.set("reason", inner.error_code());
                }
                _ => {}
            }
        })
    }
}

impl ToGraphQLError for AuthError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        let message = self.to_string();

        GraphQLError::new(message).extend_with(|_, e| {
            e.set("code", code);

            if let AuthError::InvalidEmail(email) = self {
                e.set("email", email.as_str());
            }
        })
    }
}
