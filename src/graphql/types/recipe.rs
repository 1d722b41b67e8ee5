use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::database::entities::recipes;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::recipe_error_to_graphql_error;
use crate::graphql::types::Category;
use crate::images::display_url;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub cuisine: Option<String>,
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub image_url: Option<String>,
    pub blurb: Option<String>,
    pub category_id: Option<String>,
}

impl From<recipes::Model> for Recipe {
    fn from(model: recipes::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            cuisine: model.cuisine,
            created_at: model.created_at,
            content: model.content,
            image_url: model.image_url,
            blurb: model.blurb,
            category_id: model.category_id,
        }
    }
}

#[ComplexObject]
impl Recipe {
    async fn category(&self, ctx: &Context<'_>) -> Result<Option<Category>> {
        let context = ctx.data::<GraphQLContext>()?;
        let category = context
            .recipe_service
            .category_for(&self.id)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(category.map(Category::from))
    }

    /// Absolute URL to display: uploads map to the public photo path,
    /// external addresses pass through
    async fn image_src(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        let context = ctx.data::<GraphQLContext>()?;
        Ok(display_url(&context.api_url, self.image_url.as_deref()))
    }
}
