use async_graphql::*;

use crate::graphql::context::{request_context, GraphQLContext};
use crate::graphql::errors::recipe_error_to_graphql_error;
use crate::graphql::guards::RequireAuth;
use crate::graphql::types::{CreateRecipeInput, Recipe, UpdateRecipeInput};

#[derive(Default)]
pub struct RecipeMutation;

#[Object]
impl RecipeMutation {
    /// Add a recipe to the caller's collection
    #[graphql(guard = "RequireAuth")]
    async fn add_to_my_recipes(&self, ctx: &Context<'_>, id: String) -> Result<Recipe> {
        let context = ctx.data::<GraphQLContext>()?;
        let recipe = context
            .recipe_service
            .add_to_my_recipes(&request_context(ctx), &id)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(Recipe::from(recipe))
    }

    #[graphql(guard = "RequireAuth")]
    async fn create_recipe(&self, ctx: &Context<'_>, input: CreateRecipeInput) -> Result<Recipe> {
        let context = ctx.data::<GraphQLContext>()?;
        let request = input.into_request(ctx).await?;

        let recipe = context
            .recipe_service
            .create_recipe(&request_context(ctx), request)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(Recipe::from(recipe))
    }

    #[graphql(guard = "RequireAuth")]
    async fn update_recipe(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateRecipeInput,
    ) -> Result<Recipe> {
        let context = ctx.data::<GraphQLContext>()?;
        let request = input.into_request(ctx).await?;

        let recipe = context
            .recipe_service
            .update_recipe(&request_context(ctx), &id, request)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(Recipe::from(recipe))
    }

    /// Delete a recipe, returning it as it was
    #[graphql(guard = "RequireAuth")]
    async fn delete_recipe(&self, ctx: &Context<'_>, id: String) -> Result<Recipe> {
        let context = ctx.data::<GraphQLContext>()?;
        let recipe = context
            .recipe_service
            .delete_recipe(&request_context(ctx), &id)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(Recipe::from(recipe))
    }
}
