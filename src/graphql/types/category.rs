use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::auth::RequestContext;
use crate::database::entities::categories;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::recipe_error_to_graphql_error;
use crate::graphql::types::Recipe;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[ComplexObject]
impl Category {
    async fn recipes(&self, ctx: &Context<'_>) -> Result<Vec<Recipe>> {
        let context = ctx.data::<GraphQLContext>()?;
        let recipes = context
            .recipe_service
            .recipes(&RequestContext::anonymous(), Some(self.id.clone()), None)
            .await
            .map_err(recipe_error_to_graphql_error)?;

        Ok(recipes.into_iter().map(Recipe::from).collect())
    }
}
