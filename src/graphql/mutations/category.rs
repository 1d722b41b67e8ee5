use async_graphql::*;

use crate::graphql::context::{request_context, GraphQLContext};
use crate::graphql::errors::recipe_error_to_graphql_error;
use crate::graphql::guards::RequireAuth;
use crate::graphql::types::Category;

#[derive(Default)]
pub struct CategoryMutation;

#[Object]
impl CategoryMutation {
    #[graphql(guard = "RequireAuth")]
    async fn create_category(&self, ctx: &Context<'_>, name: String) -> Result<Category> {
        let context = ctx.data::<GraphQLContext>()?;
        let category = context
            .category_service
            .create_category(&request_context(ctx), &name)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(Category::from(category))
    }

    #[graphql(guard = "RequireAuth")]
    async fn update_category(&self, ctx: &Context<'_>, id: String, name: String) -> Result<Category> {
        let context = ctx.data::<GraphQLContext>()?;
        let category = context
            .category_service
            .update_category(&request_context(ctx), &id, &name)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(Category::from(category))
    }

    /// Delete a category; its recipes are kept without a category
    #[graphql(guard = "RequireAuth")]
    async fn delete_category(&self, ctx: &Context<'_>, id: String) -> Result<Category> {
        let context = ctx.data::<GraphQLContext>()?;
        let category = context
            .category_service
            .delete_category(&request_context(ctx), &id)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(Category::from(category))
    }
}
