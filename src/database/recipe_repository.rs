use chrono::Utc;
use sea_orm::sea_query::{OnConflict, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::database::entities::{categories, recipe_users, recipes};
use crate::errors::{RecipeError, RecipeResult};

/// Persistable fields of a new recipe. Carries no upload payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub cuisine: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub blurb: Option<String>,
    pub category_id: Option<String>,
}

/// Partial update. `None` leaves a column untouched; for nullable columns
/// `Some(None)` clears the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub cuisine: Option<Option<String>>,
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
    pub blurb: Option<Option<String>>,
    pub category_id: Option<Option<String>>,
}

impl RecipeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cuisine.is_none()
            && self.content.is_none()
            && self.image_url.is_none()
            && self.blurb.is_none()
            && self.category_id.is_none()
    }

    fn apply(self, active: &mut recipes::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(cuisine) = self.cuisine {
            active.cuisine = Set(cuisine);
        }
        if let Some(content) = self.content {
            active.content = Set(content);
        }
        if let Some(image_url) = self.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(blurb) = self.blurb {
            active.blurb = Set(blurb);
        }
        if let Some(category_id) = self.category_id {
            active.category_id = Set(category_id);
        }
    }
}

/// Read-side predicates for [`RecipeRepository::list`], ANDed together
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Only recipes in this category
    pub category: Option<String>,
    /// Only recipes in this user's collection
    pub member: Option<String>,
}

impl RecipeFilter {
    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category = Some(category_id.into());
        self
    }

    pub fn for_member(mut self, user_id: impl Into<String>) -> Self {
        self.member = Some(user_id.into());
        self
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(category_id) = &self.category {
            condition = condition.add(recipes::Column::CategoryId.eq(category_id.as_str()));
        }

        if let Some(user_id) = &self.member {
            condition = condition.add(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(recipe_users::Column::RecipeId)
                        .from(recipe_users::Entity)
                        .and_where(recipe_users::Column::UserId.eq(user_id.as_str()))
                        .to_owned(),
                ),
            );
        }

        condition
    }
}

/// Query and mutation façade over the `recipes` table
#[derive(Clone, Debug)]
pub struct RecipeRepository {
    db: DatabaseConnection,
}

impl RecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: &RecipeFilter) -> Result<Vec<recipes::Model>, DbErr> {
        recipes::Entity::find()
            .filter(filter.condition())
            .order_by_asc(recipes::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<recipes::Model>, DbErr> {
        recipes::Entity::find_by_id(id).one(&self.db).await
    }

    pub async fn exists(&self, id: &str) -> Result<bool, DbErr> {
        Ok(self.get_by_id(id).await?.is_some())
    }

    pub async fn create(&self, recipe: NewRecipe) -> Result<recipes::Model, DbErr> {
        let model = recipes::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(recipe.name),
            cuisine: Set(recipe.cuisine),
            content: Set(recipe.content),
            image_url: Set(recipe.image_url),
            blurb: Set(recipe.blurb),
            category_id: Set(recipe.category_id),
            created_at: Set(Utc::now()),
        };

        model.insert(&self.db).await
    }

    /// Apply `changes` to an existing recipe; columns not mentioned keep
    /// their stored values
    pub async fn update(&self, id: &str, changes: RecipeChanges) -> RecipeResult<recipes::Model> {
        let recipe = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RecipeError::not_found("Recipe", id))?;

        if changes.is_empty() {
            return Ok(recipe);
        }

        let mut active: recipes::ActiveModel = recipe.into();
        changes.apply(&mut active);

        Ok(active.update(&self.db).await?)
    }

    /// Hard delete, returning the row as it was before deletion
    pub async fn delete(&self, id: &str) -> RecipeResult<recipes::Model> {
        let txn = self.db.begin().await?;

        let recipe = recipes::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| RecipeError::not_found("Recipe", id))?;

        recipe_users::Entity::delete_many()
            .filter(recipe_users::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;

        recipes::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(recipe)
    }

    pub async fn category_for(&self, id: &str) -> Result<Option<categories::Model>, DbErr> {
        let found = recipes::Entity::find_by_id(id)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?;

        Ok(found.and_then(|(_, category)| category))
    }

    pub async fn category_exists(&self, category_id: &str) -> Result<bool, DbErr> {
        Ok(categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?
            .is_some())
    }

    /// Link a recipe into a user's collection. Returns false when the link
    /// already existed.
    pub async fn add_member(&self, recipe_id: &str, user_id: &str) -> Result<bool, DbErr> {
        let link = recipe_users::ActiveModel {
            recipe_id: Set(recipe_id.to_string()),
            user_id: Set(user_id.to_string()),
        };

        let inserted = recipe_users::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    recipe_users::Column::RecipeId,
                    recipe_users::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted > 0)
    }
}
