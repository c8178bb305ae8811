use crate::errors::ModelError;
use crate::{book, category};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectOptions, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = crate::db::connect_with_options(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_category_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let root = category::create(&db, "Fiction", None).await?;
    assert_eq!(root.name, "Fiction");
    assert_eq!(root.parent_category_id, None);

    let child = category::create(&db, "Sci-Fi", Some(root.id)).await?;
    assert_eq!(child.parent_category_id, Some(root.id));

    let children = category::Entity::find()
        .filter(category::Column::ParentCategoryId.eq(root.id))
        .all(&db)
        .await?;
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, child.id);

    let found_by_name = category::Entity::find()
        .filter(category::Column::Name.eq("Sci-Fi"))
        .one(&db)
        .await?;
    assert_eq!(found_by_name.map(|c| c.id), Some(child.id));

    category::Entity::delete_by_id(child.id).exec(&db).await?;
    assert!(category::Entity::find_by_id(child.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_category_blank_name_rejected() -> Result<()> {
    let db = setup_test_db().await?;
    let err = category::create(&db, "   ", None).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_book_crud() -> Result<()> {
    let db = setup_test_db().await?;
    let cat = category::create(&db, "Classics", None).await?;

    let b = book::create(&db, "Dune", "Frank Herbert", cat.id, Some("Spice")).await?;
    assert_eq!(b.category_id, cat.id);
    assert_eq!(b.description.as_deref(), Some("Spice"));

    let without_description = book::create(&db, "Emma", "Jane Austen", cat.id, None).await?;
    assert!(without_description.description.is_none());

    let in_category = book::Entity::find()
        .filter(book::Column::CategoryId.eq(cat.id))
        .all(&db)
        .await?;
    assert_eq!(in_category.len(), 2);

    let res = book::Entity::delete_by_id(b.id).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    Ok(())
}

#[test]
fn test_field_validation() {
    assert!(category::validate_name("Poetry").is_ok());
    assert!(category::validate_name(&"x".repeat(category::NAME_MAX_LEN + 1)).is_err());
    assert!(book::validate_name("").is_err());
    assert!(book::validate_author("  ").is_err());
    assert!(book::validate_author("Ursula K. Le Guin").is_ok());
}

#[tokio::test]
async fn test_category_store_constraints() -> Result<()> {
    let db = setup_test_db().await?;
    let fiction = category::create(&db, "Fiction", None).await?;
    let poetry = category::create(&db, "Poetry", None).await?;

    let mut self_parent: category::ActiveModel = fiction.clone().into();
    self_parent.parent_category_id = Set(Some(fiction.id));
    let err = self_parent.update(&db).await.map_err(ModelError::from).unwrap_err();
    assert!(matches!(err, ModelError::Db(_)), "check constraint should reject self parent: {err:?}");

    let mut rename: category::ActiveModel = poetry.into();
    rename.name = Set("Fiction".to_string());
    let err = rename.update(&db).await.map_err(ModelError::from).unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "unique index should surface as conflict: {err:?}");

    let dup = category::create(&db, "Fiction", None).await.unwrap_err();
    assert!(matches!(dup, ModelError::Conflict(_)));

    let unchanged = category::Entity::find_by_id(fiction.id).one(&db).await?.unwrap();
    assert_eq!(unchanged.parent_category_id, None);
    Ok(())
}
