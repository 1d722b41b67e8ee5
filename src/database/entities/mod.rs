pub mod categories;
pub mod recipe_users;
pub mod recipes;
pub mod user_sessions;
pub mod users;
