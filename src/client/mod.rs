//! Client-side recipe form flow
//!
//! [`RecipeForm`] owns the field values, the [`ImageInput`] state machine
//! and inline errors, assembles create/update requests and reports what the
//! UI should do after a mutation (notification, redirect, stale queries).
//! Mutations go through a [`RecipeGateway`]; [`LocalGateway`] calls the
//! recipe service directly.

pub mod image_input;
pub mod recipe_form;

pub use image_input::{
    ImageInput, ImageInputError, ImageInputState, InMemoryObjectUrls, ObjectUrls,
};
pub use recipe_form::{
    confirm_and_delete, delete_confirmation_message, LocalGateway, Notification, QueryKey,
    RecipeField, RecipeForm, RecipeFormValues, RecipeGateway, Redirect, SubmitOutcome,
};
