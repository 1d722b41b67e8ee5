use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

use crate::auth::RequestContext;
use crate::database::entities::{categories, recipes};
use crate::database::{NewRecipe, RecipeChanges, RecipeFilter, RecipeRepository};
use crate::errors::{RecipeError, RecipeResult};
use crate::images::{ImageStore, ImageUpload, RECIPE_IMAGE_FOLDER};
use crate::services::validation::ValidationService;

/// Input for `createRecipe`. `image` is a transient upload and is never
/// persisted as such.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub cuisine: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub image: Option<ImageUpload>,
    pub blurb: Option<String>,
    pub category_id: Option<String>,
}

impl CreateRecipeRequest {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Split into the persistable fields and the optional upload
    pub fn into_parts(self) -> (NewRecipe, Option<ImageUpload>) {
        let recipe = NewRecipe {
            name: self.name,
            cuisine: ValidationService::normalize_optional(self.cuisine),
            content: self.content,
            image_url: ValidationService::normalize_optional(self.image_url),
            blurb: ValidationService::normalize_optional(self.blurb),
            category_id: ValidationService::normalize_optional(self.category_id),
        };

        (recipe, self.image)
    }
}

/// Input for `updateRecipe`. Absent fields stay untouched; `Some(None)`
/// clears a nullable column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub cuisine: Option<Option<String>>,
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
    pub image: Option<ImageUpload>,
    pub blurb: Option<Option<String>>,
    pub category_id: Option<Option<String>>,
}

impl UpdateRecipeRequest {
    pub fn into_parts(self) -> (RecipeChanges, Option<ImageUpload>) {
        let changes = RecipeChanges {
            name: self.name,
            cuisine: self.cuisine.map(ValidationService::normalize_optional),
            content: self.content,
            image_url: self.image_url.map(ValidationService::normalize_optional),
            blurb: self.blurb.map(ValidationService::normalize_optional),
            category_id: self.category_id.map(ValidationService::normalize_optional),
        };

        (changes, self.image)
    }
}

/// Recipe queries and mutations. Mutations require an authenticated
/// [`RequestContext`] and check it before touching the database or the
/// image store.
#[derive(Clone)]
pub struct RecipeService {
    repo: RecipeRepository,
    images: Arc<dyn ImageStore>,
}

impl RecipeService {
    pub fn new(db: DatabaseConnection, images: Arc<dyn ImageStore>) -> Self {
        Self {
            repo: RecipeRepository::new(db),
            images,
        }
    }

    pub async fn recipes(
        &self,
        ctx: &RequestContext,
        category: Option<String>,
        for_user: Option<bool>,
    ) -> RecipeResult<Vec<recipes::Model>> {
        let mut filter = RecipeFilter::default();

        // A blank category places no restriction
        if let Some(category_id) = category.filter(|c| !c.trim().is_empty()) {
            filter = filter.in_category(category_id);
        }

        if for_user.unwrap_or(false) {
            match ctx.user_id() {
                Some(user_id) => filter = filter.for_member(user_id),
                None => {
                    debug!("forUser requested without a session, returning no recipes");
                    return Ok(Vec::new());
                }
            }
        }

        debug!("Listing recipes with filter {:?}", filter);
        Ok(self.repo.list(&filter).await?)
    }

    pub async fn recipe(
        &self,
        _ctx: &RequestContext,
        id: &str,
    ) -> RecipeResult<Option<recipes::Model>> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn create_recipe(
        &self,
        ctx: &RequestContext,
        request: CreateRecipeRequest,
    ) -> RecipeResult<recipes::Model> {
        let user = ctx.require_user()?;

        let (mut recipe, image) = request.into_parts();
        recipe.name = ValidationService::validate_recipe_name(&recipe.name)?;
        recipe.content = ValidationService::validate_content(&recipe.content)?;
        if image.is_none() {
            if let Some(url) = &recipe.image_url {
                ValidationService::validate_image_url(url)?;
            }
        }
        self.ensure_category(recipe.category_id.as_deref()).await?;

        let stored = self.store_image(image).await?;
        if let Some(path) = &stored {
            recipe.image_url = Some(path.clone());
        }

        match self.repo.create(recipe).await {
            Ok(created) => {
                info!("User {} created recipe {}", user.id, created.id);
                Ok(created)
            }
            Err(e) => {
                self.discard_image(stored).await;
                Err(e.into())
            }
        }
    }

    pub async fn update_recipe(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: UpdateRecipeRequest,
    ) -> RecipeResult<recipes::Model> {
        let user = ctx.require_user()?;

        let (mut changes, image) = request.into_parts();
        if let Some(name) = &changes.name {
            changes.name = Some(ValidationService::validate_recipe_name(name)?);
        }
        if let Some(content) = &changes.content {
            changes.content = Some(ValidationService::validate_content(content)?);
        }
        if image.is_none() {
            if let Some(Some(url)) = &changes.image_url {
                ValidationService::validate_image_url(url)?;
            }
        }

        if !self.repo.exists(id).await? {
            return Err(RecipeError::not_found("Recipe", id));
        }
        if let Some(category_id) = &changes.category_id {
            self.ensure_category(category_id.as_deref()).await?;
        }

        let stored = self.store_image(image).await?;
        if let Some(path) = &stored {
            changes.image_url = Some(Some(path.clone()));
        }

        match self.repo.update(id, changes).await {
            Ok(updated) => {
                info!("User {} updated recipe {}", user.id, id);
                Ok(updated)
            }
            Err(e) => {
                self.discard_image(stored).await;
                Err(e)
            }
        }
    }

    pub async fn delete_recipe(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> RecipeResult<recipes::Model> {
        let user = ctx.require_user()?;

        let deleted = self.repo.delete(id).await?;
        info!("User {} deleted recipe {}", user.id, id);
        Ok(deleted)
    }

    /// Link the recipe into the caller's collection. Repeated calls are
    /// harmless.
    pub async fn add_to_my_recipes(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> RecipeResult<recipes::Model> {
        let user = ctx.require_user()?;

        let recipe = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| RecipeError::not_found("Recipe", id))?;

        if self.repo.add_member(id, &user.id).await? {
            info!("User {} added recipe {} to their recipes", user.id, id);
        } else {
            debug!("Recipe {} already in collection of user {}", id, user.id);
        }

        Ok(recipe)
    }

    pub async fn category_for(&self, recipe_id: &str) -> RecipeResult<Option<categories::Model>> {
        Ok(self.repo.category_for(recipe_id).await?)
    }

    async fn ensure_category(&self, category_id: Option<&str>) -> RecipeResult<()> {
        match category_id {
            Some(category_id) if !self.repo.category_exists(category_id).await? => {
                Err(RecipeError::validation(
                    "categoryId",
                    format!("Category '{}' does not exist", category_id),
                ))
            }
            _ => Ok(()),
        }
    }

    async fn store_image(&self, image: Option<ImageUpload>) -> RecipeResult<Option<String>> {
        let Some(upload) = image else {
            return Ok(None);
        };

        let path = self.images.save(&upload, RECIPE_IMAGE_FOLDER).await?;
        debug!("Stored recipe image {} as {}", upload.filename, path);
        Ok(Some(path))
    }

    async fn discard_image(&self, path: Option<String>) {
        if let Some(path) = path {
            if let Err(e) = self.images.remove(&path).await {
                warn!("Failed to remove orphaned recipe image {}: {}", path, e);
            }
        }
    }
}
