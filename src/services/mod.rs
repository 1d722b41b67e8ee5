pub mod auth_service;
pub mod category_service;
pub mod recipe_service;
pub mod validation;

pub use auth_service::{AuthService, AuthSession};
pub use category_service::CategoryService;
pub use recipe_service::{CreateRecipeRequest, RecipeService, UpdateRecipeRequest};
pub use validation::ValidationService;
