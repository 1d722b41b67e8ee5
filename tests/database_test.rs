//! Database functionality tests
//!
//! Tests for migrations, entity relations and the recipe repository

use anyhow::Result;
use recipebox::database::entities::*;
use recipebox::database::{setup_database, NewRecipe, RecipeChanges, RecipeFilter, RecipeRepository};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, ModelTrait};
use tempfile::NamedTempFile;

/// Create a test database connection with migrations
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

async fn create_user(db: &DatabaseConnection, email: &str) -> Result<users::Model> {
    Ok(users::ActiveModel::new(
        email.to_string(),
        "Cook".to_string(),
        "not-a-real-hash".to_string(),
    )
    .insert(db)
    .await?)
}

fn soup() -> NewRecipe {
    NewRecipe {
        name: "Soup".to_string(),
        content: "Boil water".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Verify all tables exist by attempting to query them
    assert!(recipes::Entity::find().all(&db).await?.is_empty());
    assert!(categories::Entity::find().all(&db).await?.is_empty());
    assert!(users::Entity::find().all(&db).await?.is_empty());
    assert!(user_sessions::Entity::find().all(&db).await?.is_empty());
    assert!(recipe_users::Entity::find().all(&db).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_assigns_fresh_ids() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let repo = RecipeRepository::new(db);

    let first = repo.create(soup()).await?;
    let second = repo.create(soup()).await?;

    assert_ne!(first.id, second.id);
    assert_eq!(first.name, "Soup");
    assert_eq!(
        repo.get_by_id(&first.id).await?.map(|r| r.id),
        Some(first.id.clone())
    );

    Ok(())
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let repo = RecipeRepository::new(db);

    let created = repo
        .create(NewRecipe {
            blurb: Some("Warm".to_string()),
            ..soup()
        })
        .await?;

    let updated = repo
        .update(
            &created.id,
            RecipeChanges {
                cuisine: Some(Some("Italian".to_string())),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.cuisine.as_deref(), Some("Italian"));
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.blurb, created.blurb);
    assert_eq!(updated.created_at, created.created_at);

    let cleared = repo
        .update(
            &created.id,
            RecipeChanges {
                blurb: Some(None),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(cleared.blurb, None);
    assert_eq!(cleared.cuisine.as_deref(), Some("Italian"));

    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_missing_recipe() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let repo = RecipeRepository::new(db);

    let err = repo
        .update("missing", RecipeChanges::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = repo.delete("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!repo.exists("missing").await?);

    Ok(())
}

#[tokio::test]
async fn test_filters_combine() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let repo = RecipeRepository::new(db.clone());

    let desserts = categories::ActiveModel::new("Desserts".to_string())
        .insert(&db)
        .await?;
    let user = create_user(&db, "cook@example.com").await?;

    let cake = repo
        .create(NewRecipe {
            name: "Cake".to_string(),
            category_id: Some(desserts.id.clone()),
            ..soup()
        })
        .await?;
    let pie = repo
        .create(NewRecipe {
            name: "Pie".to_string(),
            category_id: Some(desserts.id.clone()),
            ..soup()
        })
        .await?;
    let stew = repo.create(soup()).await?;

    assert!(repo.add_member(&cake.id, &user.id).await?);
    assert!(repo.add_member(&stew.id, &user.id).await?);
    assert!(!repo.add_member(&cake.id, &user.id).await?);

    let all = repo.list(&RecipeFilter::default()).await?;
    assert_eq!(all.len(), 3);

    let in_category = repo
        .list(&RecipeFilter::default().in_category(desserts.id.clone()))
        .await?;
    let mut names: Vec<_> = in_category.iter().map(|r| r.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Cake", "Pie"]);

    let mine = repo
        .list(&RecipeFilter::default().for_member(user.id.clone()))
        .await?;
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| r.id != pie.id));

    let both = repo
        .list(
            &RecipeFilter::default()
                .in_category(desserts.id.clone())
                .for_member(user.id.clone()),
        )
        .await?;
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, cake.id);

    Ok(())
}

#[tokio::test]
async fn test_category_relation() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let repo = RecipeRepository::new(db.clone());

    let soups = categories::ActiveModel::new("Soups".to_string())
        .insert(&db)
        .await?;
    let recipe = repo
        .create(NewRecipe {
            category_id: Some(soups.id.clone()),
            ..soup()
        })
        .await?;
    let plain = repo.create(soup()).await?;

    assert_eq!(
        repo.category_for(&recipe.id).await?.map(|c| c.id),
        Some(soups.id.clone())
    );
    assert_eq!(repo.category_for(&plain.id).await?, None);
    assert!(repo.category_exists(&soups.id).await?);
    assert!(!repo.category_exists("missing").await?);

    let related = soups.find_related(recipes::Entity).all(&db).await?;
    assert_eq!(related.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_memberships() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let repo = RecipeRepository::new(db.clone());
    let user = create_user(&db, "cook@example.com").await?;

    let recipe = repo.create(soup()).await?;
    repo.add_member(&recipe.id, &user.id).await?;

    let deleted = repo.delete(&recipe.id).await?;
    assert_eq!(deleted.id, recipe.id);
    assert_eq!(repo.get_by_id(&recipe.id).await?, None);
    assert!(recipe_users::Entity::find().all(&db).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_user_recipes_relation() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let repo = RecipeRepository::new(db.clone());
    let user = create_user(&db, "cook@example.com").await?;

    let recipe = repo.create(soup()).await?;
    repo.add_member(&recipe.id, &user.id).await?;

    let collection = user.find_related(recipes::Entity).all(&db).await?;
    assert_eq!(collection.len(), 1);
    assert_eq!(collection[0].id, recipe.id);

    Ok(())
}
