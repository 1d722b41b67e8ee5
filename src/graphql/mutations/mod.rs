mod auth;
mod category;
mod recipe;

use async_graphql::*;

/// Mutation root combining the per-area mutation objects
#[derive(Default, MergedObject)]
pub struct Mutation(
    pub auth::AuthMutation,
    pub category::CategoryMutation,
    pub recipe::RecipeMutation,
);
