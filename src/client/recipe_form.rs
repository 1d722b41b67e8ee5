use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::RequestContext;
use crate::client::image_input::{ImageInput, ObjectUrls};
use crate::database::entities::recipes;
use crate::errors::{RecipeError, RecipeResult};
use crate::images::{accepted_extension, is_uploaded_image, public_url};
use crate::services::{CreateRecipeRequest, RecipeService, UpdateRecipeRequest};

/// Executes recipe mutations on behalf of the form
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    async fn create_recipe(&self, request: CreateRecipeRequest) -> RecipeResult<recipes::Model>;

    async fn update_recipe(
        &self,
        id: &str,
        request: UpdateRecipeRequest,
    ) -> RecipeResult<recipes::Model>;

    async fn delete_recipe(&self, id: &str) -> RecipeResult<recipes::Model>;
}

/// Gateway calling the recipe service in-process as a fixed identity
#[derive(Clone)]
pub struct LocalGateway {
    service: Arc<RecipeService>,
    ctx: RequestContext,
}

impl LocalGateway {
    pub fn new(service: Arc<RecipeService>, ctx: RequestContext) -> Self {
        Self { service, ctx }
    }
}

#[async_trait]
impl RecipeGateway for LocalGateway {
    async fn create_recipe(&self, request: CreateRecipeRequest) -> RecipeResult<recipes::Model> {
        self.service.create_recipe(&self.ctx, request).await
    }

    async fn update_recipe(
        &self,
        id: &str,
        request: UpdateRecipeRequest,
    ) -> RecipeResult<recipes::Model> {
        self.service.update_recipe(&self.ctx, id, request).await
    }

    async fn delete_recipe(&self, id: &str) -> RecipeResult<recipes::Model> {
        self.service.delete_recipe(&self.ctx, id).await
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    AdminRecipes,
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::AdminRecipes => "/admin/recipes",
        }
    }
}

/// Cached client queries that a mutation can make stale
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKey {
    FindRecipes,
}

/// What the UI should do after a submit or delete
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub recipe: Option<recipes::Model>,
    pub notification: Option<Notification>,
    pub redirect: Option<Redirect>,
    pub invalidate: Vec<QueryKey>,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.notification, Some(Notification::Success(_)))
    }

    fn failed(err: &RecipeError) -> Self {
        Self {
            notification: Some(Notification::Error(err.to_string())),
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecipeField {
    Name,
    Cuisine,
    Content,
    ImageUrl,
    Blurb,
    CategoryId,
}

impl RecipeField {
    /// Field name as used in GraphQL inputs and validation errors
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeField::Name => "name",
            RecipeField::Cuisine => "cuisine",
            RecipeField::Content => "content",
            RecipeField::ImageUrl => "imageUrl",
            RecipeField::Blurb => "blurb",
            RecipeField::CategoryId => "categoryId",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(RecipeField::Name),
            "cuisine" => Some(RecipeField::Cuisine),
            "content" => Some(RecipeField::Content),
            "imageUrl" => Some(RecipeField::ImageUrl),
            "blurb" => Some(RecipeField::Blurb),
            "categoryId" => Some(RecipeField::CategoryId),
            _ => None,
        }
    }
}

/// Raw text of every form field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeFormValues {
    pub name: String,
    pub cuisine: String,
    pub content: String,
    pub image_url: String,
    pub blurb: String,
    pub category_id: String,
}

impl From<&recipes::Model> for RecipeFormValues {
    fn from(recipe: &recipes::Model) -> Self {
        Self {
            name: recipe.name.clone(),
            cuisine: recipe.cuisine.clone().unwrap_or_default(),
            content: recipe.content.clone(),
            image_url: recipe.image_url.clone().unwrap_or_default(),
            blurb: recipe.blurb.clone().unwrap_or_default(),
            category_id: recipe.category_id.clone().unwrap_or_default(),
        }
    }
}

impl RecipeFormValues {
    fn get(&self, field: RecipeField) -> &str {
        match field {
            RecipeField::Name => &self.name,
            RecipeField::Cuisine => &self.cuisine,
            RecipeField::Content => &self.content,
            RecipeField::ImageUrl => &self.image_url,
            RecipeField::Blurb => &self.blurb,
            RecipeField::CategoryId => &self.category_id,
        }
    }

    fn get_mut(&mut self, field: RecipeField) -> &mut String {
        match field {
            RecipeField::Name => &mut self.name,
            RecipeField::Cuisine => &mut self.cuisine,
            RecipeField::Content => &mut self.content,
            RecipeField::ImageUrl => &mut self.image_url,
            RecipeField::Blurb => &mut self.blurb,
            RecipeField::CategoryId => &mut self.category_id,
        }
    }

    fn optional(&self, field: RecipeField) -> Option<String> {
        let value = self.get(field).trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// Create/edit form for a recipe
pub struct RecipeForm<U: ObjectUrls> {
    recipe_id: Option<String>,
    persisted_image_url: Option<String>,
    values: RecipeFormValues,
    image: ImageInput<U>,
    field_errors: BTreeMap<RecipeField, String>,
    form_error: Option<String>,
}

impl<U: ObjectUrls> RecipeForm<U> {
    /// Empty form for a new recipe
    pub fn new(urls: U) -> Self {
        Self {
            recipe_id: None,
            persisted_image_url: None,
            values: RecipeFormValues::default(),
            image: ImageInput::new(urls),
            field_errors: BTreeMap::new(),
            form_error: None,
        }
    }

    /// Form seeded from an existing recipe
    pub fn edit(recipe: &recipes::Model, urls: U) -> Self {
        let mut form = Self::new(urls);
        form.recipe_id = Some(recipe.id.clone());
        form.persisted_image_url = recipe.image_url.clone();
        form.values = RecipeFormValues::from(recipe);
        form
    }

    pub fn is_edit(&self) -> bool {
        self.recipe_id.is_some()
    }

    pub fn values(&self) -> &RecipeFormValues {
        &self.values
    }

    pub fn set(&mut self, field: RecipeField, value: impl Into<String>) {
        *self.values.get_mut(field) = value.into();
        self.field_errors.remove(&field);
    }

    pub fn image(&self) -> &ImageInput<U> {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut ImageInput<U> {
        &mut self.image
    }

    pub fn field_error(&self, field: RecipeField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Check required fields and the image URL, recording field errors.
    /// Returns true when the form can be submitted.
    pub fn validate(&mut self) -> bool {
        self.field_errors.clear();

        if self.values.name.trim().is_empty() {
            self.field_errors
                .insert(RecipeField::Name, "Name is required".to_string());
        }

        if self.values.content.trim().is_empty() {
            self.field_errors
                .insert(RecipeField::Content, "Content is required".to_string());
        }

        if let Some(url) = self.values.optional(RecipeField::ImageUrl) {
            let external = url.starts_with("http://") || url.starts_with("https://");
            if !external && accepted_extension(&url).is_none() {
                self.field_errors.insert(
                    RecipeField::ImageUrl,
                    "Use an http(s) address or a .jpeg, .jpg, .gif or .png file".to_string(),
                );
            }
        }

        self.field_errors.is_empty()
    }

    pub fn create_request(&self) -> CreateRecipeRequest {
        CreateRecipeRequest {
            name: self.values.name.trim().to_string(),
            cuisine: self.values.optional(RecipeField::Cuisine),
            content: self.values.content.clone(),
            image_url: self.values.optional(RecipeField::ImageUrl),
            image: self.image.selected_file().cloned(),
            blurb: self.values.optional(RecipeField::Blurb),
            category_id: self.values.optional(RecipeField::CategoryId),
        }
    }

    /// Every field is sent; blank optional fields clear the stored value
    pub fn update_request(&self) -> UpdateRecipeRequest {
        UpdateRecipeRequest {
            name: Some(self.values.name.trim().to_string()),
            cuisine: Some(self.values.optional(RecipeField::Cuisine)),
            content: Some(self.values.content.clone()),
            image_url: Some(self.values.optional(RecipeField::ImageUrl)),
            image: self.image.selected_file().cloned(),
            blurb: Some(self.values.optional(RecipeField::Blurb)),
            category_id: Some(self.values.optional(RecipeField::CategoryId)),
        }
    }

    /// Image to show next to the form: the live preview of a newly selected
    /// file, otherwise the stored upload
    pub fn preview_source(&self, api_url: &str) -> Option<String> {
        if let Some(url) = self.image.preview_url() {
            return Some(url.to_string());
        }

        let stored = self.persisted_image_url.as_deref()?;
        if is_uploaded_image(Some(stored)) {
            Some(public_url(api_url, stored))
        } else {
            None
        }
    }

    pub async fn submit<G: RecipeGateway + ?Sized>(&mut self, gateway: &G) -> SubmitOutcome {
        self.form_error = None;
        if !self.validate() {
            return SubmitOutcome::default();
        }

        let (result, message) = match &self.recipe_id {
            Some(id) => (
                gateway.update_recipe(id, self.update_request()).await,
                "Recipe updated",
            ),
            None => (
                gateway.create_recipe(self.create_request()).await,
                "Recipe created",
            ),
        };

        match result {
            Ok(recipe) => SubmitOutcome {
                recipe: Some(recipe),
                notification: Some(Notification::Success(message.to_string())),
                redirect: Some(Redirect::AdminRecipes),
                invalidate: vec![QueryKey::FindRecipes],
            },
            Err(err) => {
                self.record_failure(&err);
                SubmitOutcome::failed(&err)
            }
        }
    }

    fn record_failure(&mut self, err: &RecipeError) {
        match err.field().and_then(RecipeField::from_name) {
            Some(field) => {
                self.field_errors.insert(field, err.to_string());
            }
            None => self.form_error = Some(err.to_string()),
        }
    }
}

/// Prompt shown before deleting a recipe
pub fn delete_confirmation_message(id: &str) -> String {
    format!("Are you sure you want to delete recipe {}?", id)
}

/// Delete after the user confirms. Returns `None` when they decline, in
/// which case no mutation is sent.
pub async fn confirm_and_delete<G, F>(gateway: &G, id: &str, confirm: F) -> Option<SubmitOutcome>
where
    G: RecipeGateway + ?Sized,
    F: FnOnce(&str) -> bool,
{
    if !confirm(&delete_confirmation_message(id)) {
        return None;
    }

    Some(match gateway.delete_recipe(id).await {
        Ok(recipe) => SubmitOutcome {
            recipe: Some(recipe),
            notification: Some(Notification::Success("Recipe deleted".to_string())),
            redirect: None,
            invalidate: vec![QueryKey::FindRecipes],
        },
        Err(err) => SubmitOutcome::failed(&err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::image_input::InMemoryObjectUrls;
    use crate::images::ImageUpload;

    fn stored_recipe(image_url: Option<&str>) -> recipes::Model {
        recipes::Model {
            id: "r1".to_string(),
            name: "Soup".to_string(),
            cuisine: None,
            content: "Boil water".to_string(),
            image_url: image_url.map(str::to_string),
            blurb: Some("Warm".to_string()),
            category_id: Some("c1".to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_validate_reports_required_fields() {
        let mut form = RecipeForm::new(InMemoryObjectUrls::new());
        assert!(!form.validate());
        assert_eq!(form.field_error(RecipeField::Name), Some("Name is required"));
        assert_eq!(
            form.field_error(RecipeField::Content),
            Some("Content is required")
        );

        form.set(RecipeField::Name, "Soup");
        assert!(form.field_error(RecipeField::Name).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_image_url() {
        let mut form = RecipeForm::new(InMemoryObjectUrls::new());
        form.set(RecipeField::Name, "Soup");
        form.set(RecipeField::Content, "Boil water");
        form.set(RecipeField::ImageUrl, "uploads/recipe-images/a.bmp");

        assert!(!form.validate());
        assert!(form.field_error(RecipeField::ImageUrl).is_some());

        form.set(RecipeField::ImageUrl, "https://example.com/soup");
        assert!(form.validate());
    }

    #[test]
    fn test_create_request_normalizes_blank_text() {
        let mut form = RecipeForm::new(InMemoryObjectUrls::new());
        form.set(RecipeField::Name, " Soup ");
        form.set(RecipeField::Content, "Boil water");
        form.set(RecipeField::Cuisine, "  ");
        form.image_mut()
            .pick(vec![ImageUpload::new("soup.png", vec![1])])
            .unwrap();

        let request = form.create_request();
        assert_eq!(request.name, "Soup");
        assert_eq!(request.cuisine, None);
        assert_eq!(request.image.unwrap().filename, "soup.png");
    }

    #[test]
    fn test_edit_form_is_seeded_and_clears_blank_fields() {
        let mut form = RecipeForm::edit(&stored_recipe(None), InMemoryObjectUrls::new());
        assert!(form.is_edit());
        assert_eq!(form.values().blurb, "Warm");

        form.set(RecipeField::Blurb, "");
        let request = form.update_request();
        assert_eq!(request.blurb, Some(None));
        assert_eq!(request.category_id, Some(Some("c1".to_string())));
        assert!(request.image.is_none());
    }

    #[test]
    fn test_preview_source_prefers_live_preview() {
        let recipe = stored_recipe(Some("uploads/recipe-images/x.png"));
        let mut form = RecipeForm::edit(&recipe, InMemoryObjectUrls::new());

        assert_eq!(
            form.preview_source("http://localhost:3000"),
            Some("http://localhost:3000/recipe-photos/x.png".to_string())
        );

        form.image_mut()
            .pick(vec![ImageUpload::new("new.jpg", vec![1])])
            .unwrap();
        let preview = form.preview_source("http://localhost:3000").unwrap();
        assert!(preview.starts_with("blob:"));
    }

    #[test]
    fn test_preview_source_ignores_external_urls() {
        let recipe = stored_recipe(Some("https://example.com/soup.png"));
        let form = RecipeForm::edit(&recipe, InMemoryObjectUrls::new());
        assert_eq!(form.preview_source("http://localhost:3000"), None);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in [
            RecipeField::Name,
            RecipeField::Cuisine,
            RecipeField::Content,
            RecipeField::ImageUrl,
            RecipeField::Blurb,
            RecipeField::CategoryId,
        ] {
            assert_eq!(RecipeField::from_name(field.as_str()), Some(field));
        }
        assert_eq!(RecipeField::from_name("image"), None);
    }

    #[test]
    fn test_delete_confirmation_message() {
        assert_eq!(
            delete_confirmation_message("r1"),
            "Are you sure you want to delete recipe r1?"
        );
    }
}
