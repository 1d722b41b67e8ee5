use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::auth::RequestContext;
use crate::database::entities::{categories, recipes};
use crate::errors::{RecipeError, RecipeResult};
use crate::services::validation::ValidationService;

#[derive(Clone)]
pub struct CategoryService {
    db: DatabaseConnection,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn categories(&self) -> RecipeResult<Vec<categories::Model>> {
        Ok(categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn category(&self, id: &str) -> RecipeResult<Option<categories::Model>> {
        Ok(categories::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create_category(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> RecipeResult<categories::Model> {
        let user = ctx.require_user()?;
        let name = ValidationService::validate_category_name(name)?;

        let category = categories::ActiveModel::new(name).insert(&self.db).await?;
        info!("User {} created category {}", user.id, category.id);
        Ok(category)
    }

    pub async fn update_category(
        &self,
        ctx: &RequestContext,
        id: &str,
        name: &str,
    ) -> RecipeResult<categories::Model> {
        ctx.require_user()?;
        let name = ValidationService::validate_category_name(name)?;

        let category = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| RecipeError::not_found("Category", id))?;

        let mut active: categories::ActiveModel = category.into();
        active.name = Set(name);
        Ok(active.update(&self.db).await?)
    }

    /// Recipes in the category survive with their category cleared
    pub async fn delete_category(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> RecipeResult<categories::Model> {
        let user = ctx.require_user()?;

        let txn = self.db.begin().await?;

        let category = categories::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| RecipeError::not_found("Category", id))?;

        recipes::Entity::update_many()
            .col_expr(recipes::Column::CategoryId, Expr::value(Option::<String>::None))
            .filter(recipes::Column::CategoryId.eq(id))
            .exec(&txn)
            .await?;

        categories::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!("User {} deleted category {}", user.id, id);
        Ok(category)
    }
}
