use std::sync::Arc;

use async_graphql::Context;
use sea_orm::DatabaseConnection;

use crate::auth::RequestContext;
use crate::images::{ImageStore, DEFAULT_MAX_UPLOAD_BYTES};
use crate::services::{AuthService, CategoryService, RecipeService};

#[derive(Clone)]
pub struct GraphQLContext {
    pub recipe_service: Arc<RecipeService>,
    pub category_service: Arc<CategoryService>,
    pub auth_service: Arc<AuthService>,
    /// Base URL stored image paths are served under
    pub api_url: String,
    /// Uploads larger than this are rejected before they are read
    pub max_upload_bytes: usize,
}

impl GraphQLContext {
    pub fn new(db: DatabaseConnection, images: Arc<dyn ImageStore>, api_url: impl Into<String>) -> Self {
        Self {
            recipe_service: Arc::new(RecipeService::new(db.clone(), images)),
            category_service: Arc::new(CategoryService::new(db.clone())),
            auth_service: Arc::new(AuthService::new(db)),
            api_url: api_url.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// Identity attached to the executing request, anonymous when none was set
pub fn request_context(ctx: &Context<'_>) -> RequestContext {
    ctx.data_opt::<RequestContext>().cloned().unwrap_or_default()
}
