pub mod connection;
pub mod entities;
pub mod migrations;
pub mod recipe_repository;

pub use connection::*;
pub use entities::*;
pub use recipe_repository::{NewRecipe, RecipeChanges, RecipeFilter, RecipeRepository};
