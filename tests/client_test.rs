//! Recipe form flow tests against a real recipe service

use std::sync::Arc;

use anyhow::Result;
use recipebox::auth::{CurrentUser, RequestContext};
use recipebox::client::{
    confirm_and_delete, InMemoryObjectUrls, LocalGateway, Notification, QueryKey, RecipeField,
    RecipeForm, Redirect,
};
use recipebox::database::entities::{recipes, users};
use recipebox::database::setup_database;
use recipebox::images::{ImageUpload, LocalImageStore};
use recipebox::services::RecipeService;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait};
use tempfile::{NamedTempFile, TempDir};

struct TestEnv {
    db: DatabaseConnection,
    service: Arc<RecipeService>,
    user: RequestContext,
    _db_file: NamedTempFile,
    _upload_dir: TempDir,
}

async fn setup_test_env() -> Result<TestEnv> {
    let db_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", db_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    let upload_dir = TempDir::new()?;
    let service = Arc::new(RecipeService::new(
        db.clone(),
        Arc::new(LocalImageStore::new(upload_dir.path())),
    ));

    let user = users::ActiveModel::new(
        "cook@example.com".to_string(),
        "Cook".to_string(),
        "not-a-real-hash".to_string(),
    )
    .insert(&db)
    .await?;

    Ok(TestEnv {
        db,
        service,
        user: RequestContext::authenticated(CurrentUser::from(user)),
        _db_file: db_file,
        _upload_dir: upload_dir,
    })
}

#[tokio::test]
async fn test_create_submit_redirects_and_invalidates() -> Result<()> {
    let env = setup_test_env().await?;
    let gateway = LocalGateway::new(env.service.clone(), env.user.clone());

    let mut form = RecipeForm::new(InMemoryObjectUrls::new());
    form.set(RecipeField::Name, "Soup");
    form.set(RecipeField::Content, "Boil water");
    form.set(RecipeField::Cuisine, "   ");
    form.image_mut()
        .pick(vec![ImageUpload::new("soup.png", vec![0x89, 0x50])])?;

    let outcome = form.submit(&gateway).await;

    assert!(outcome.is_success());
    assert_eq!(
        outcome.notification,
        Some(Notification::Success("Recipe created".to_string()))
    );
    assert_eq!(outcome.redirect, Some(Redirect::AdminRecipes));
    assert_eq!(outcome.invalidate, vec![QueryKey::FindRecipes]);

    let recipe = outcome.recipe.expect("created recipe returned");
    assert_eq!(recipe.cuisine, None);
    assert!(recipe
        .image_url
        .as_deref()
        .is_some_and(|url| url.starts_with("uploads/recipe-images/")));

    Ok(())
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() -> Result<()> {
    let env = setup_test_env().await?;
    let gateway = LocalGateway::new(env.service.clone(), env.user.clone());

    let mut form = RecipeForm::new(InMemoryObjectUrls::new());
    form.set(RecipeField::Name, "Soup");

    let outcome = form.submit(&gateway).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.notification, None);
    assert!(form.field_error(RecipeField::Content).is_some());
    assert!(recipes::Entity::find().all(&env.db).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_server_rejection_is_reported() -> Result<()> {
    let env = setup_test_env().await?;

    let mut form = RecipeForm::new(InMemoryObjectUrls::new());
    form.set(RecipeField::Name, "Soup");
    form.set(RecipeField::Content, "Boil water");
    form.set(RecipeField::CategoryId, "missing");

    let gateway = LocalGateway::new(env.service.clone(), env.user.clone());
    let outcome = form.submit(&gateway).await;

    assert!(matches!(outcome.notification, Some(Notification::Error(_))));
    assert_eq!(outcome.redirect, None);
    assert!(outcome.invalidate.is_empty());
    assert!(form.field_error(RecipeField::CategoryId).is_some());

    // Without a session the failure is not tied to a field
    let anonymous = LocalGateway::new(env.service.clone(), RequestContext::anonymous());
    form.set(RecipeField::CategoryId, "");
    let outcome = form.submit(&anonymous).await;

    assert!(!outcome.is_success());
    assert_eq!(
        form.form_error(),
        Some("You must be logged in to perform this action")
    );

    Ok(())
}

#[tokio::test]
async fn test_edit_submit_updates_recipe() -> Result<()> {
    let env = setup_test_env().await?;
    let gateway = LocalGateway::new(env.service.clone(), env.user.clone());

    let mut form = RecipeForm::new(InMemoryObjectUrls::new());
    form.set(RecipeField::Name, "Soup");
    form.set(RecipeField::Content, "Boil water");
    form.set(RecipeField::Blurb, "Warm");
    let created = form.submit(&gateway).await.recipe.expect("created");

    let mut form = RecipeForm::edit(&created, InMemoryObjectUrls::new());
    assert!(form.is_edit());
    form.set(RecipeField::Cuisine, "Italian");
    form.set(RecipeField::Blurb, "");

    let outcome = form.submit(&gateway).await;

    assert_eq!(
        outcome.notification,
        Some(Notification::Success("Recipe updated".to_string()))
    );
    let updated = outcome.recipe.expect("updated recipe returned");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.cuisine.as_deref(), Some("Italian"));
    assert_eq!(updated.blurb, None);
    assert_eq!(updated.name, "Soup");

    Ok(())
}

#[tokio::test]
async fn test_confirm_and_delete() -> Result<()> {
    let env = setup_test_env().await?;
    let gateway = LocalGateway::new(env.service.clone(), env.user.clone());

    let mut form = RecipeForm::new(InMemoryObjectUrls::new());
    form.set(RecipeField::Name, "Soup");
    form.set(RecipeField::Content, "Boil water");
    let created = form.submit(&gateway).await.recipe.expect("created");

    let mut prompt = String::new();
    let declined = confirm_and_delete(&gateway, &created.id, |message| {
        prompt = message.to_string();
        false
    })
    .await;
    assert!(declined.is_none());
    assert_eq!(
        prompt,
        format!("Are you sure you want to delete recipe {}?", created.id)
    );
    assert!(env.service.recipe(&env.user, &created.id).await?.is_some());

    let outcome = confirm_and_delete(&gateway, &created.id, |_| true)
        .await
        .expect("confirmed");
    assert_eq!(
        outcome.notification,
        Some(Notification::Success("Recipe deleted".to_string()))
    );
    assert_eq!(outcome.invalidate, vec![QueryKey::FindRecipes]);
    assert!(env.service.recipe(&env.user, &created.id).await?.is_none());

    let outcome = confirm_and_delete(&gateway, &created.id, |_| true)
        .await
        .expect("confirmed");
    assert!(matches!(outcome.notification, Some(Notification::Error(_))));

    Ok(())
}
