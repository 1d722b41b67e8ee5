use async_graphql::*;

use crate::graphql::context::{request_context, GraphQLContext};
use crate::graphql::errors::{auth_error_to_graphql_error, recipe_error_to_graphql_error};
use crate::graphql::types::{Category, Recipe, User};

pub struct Query;

#[Object]
impl Query {
    /// List recipes, optionally restricted to a category and/or the
    /// caller's own collection
    async fn recipes(
        &self,
        ctx: &Context<'_>,
        category: Option<String>,
        for_user: Option<bool>,
    ) -> Result<Vec<Recipe>> {
        let context = ctx.data::<GraphQLContext>()?;
        let recipes = context
            .recipe_service
            .recipes(&request_context(ctx), category, for_user)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(recipes.into_iter().map(Recipe::from).collect())
    }

    /// Get a specific recipe by ID
    async fn recipe(&self, ctx: &Context<'_>, id: String) -> Result<Option<Recipe>> {
        let context = ctx.data::<GraphQLContext>()?;
        let recipe = context
            .recipe_service
            .recipe(&request_context(ctx), &id)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(recipe.map(Recipe::from))
    }

    async fn categories(&self, ctx: &Context<'_>) -> Result<Vec<Category>> {
        let context = ctx.data::<GraphQLContext>()?;
        let categories = context
            .category_service
            .categories()
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(categories.into_iter().map(Category::from).collect())
    }

    async fn category(&self, ctx: &Context<'_>, id: String) -> Result<Option<Category>> {
        let context = ctx.data::<GraphQLContext>()?;
        let category = context
            .category_service
            .category(&id)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(category.map(Category::from))
    }

    /// The logged-in user, or null for anonymous requests
    async fn current_user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let Some(current) = request_context(ctx).current_user else {
            return Ok(None);
        };

        let user = context
            .auth_service
            .find_user(&current.id)
            .await
            .map_err(auth_error_to_graphql_error)?;

        Ok(user.map(User::from))
    }
}
