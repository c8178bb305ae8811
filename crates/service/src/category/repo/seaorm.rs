use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use models::category;

use crate::category::domain::{Category, UpdateCategoryInput};
use crate::category::repository::CategoryRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmCategoryRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ServiceError> {
        let found = category::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError> {
        let found = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found.map(Category::from))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = category::Entity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_all(&self) -> Result<Vec<Category>, ServiceError> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_children(&self, parent_id: i32) -> Result<Vec<Category>, ServiceError> {
        let rows = category::Entity::find()
            .filter(category::Column::ParentCategoryId.eq(parent_id))
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn insert(&self, name: &str, parent_category_id: Option<i32>) -> Result<Category, ServiceError> {
        let created = category::create(&self.db, name, parent_category_id).await?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, changes: &UpdateCategoryInput) -> Result<Category, ServiceError> {
        let mut am: category::ActiveModel = category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("category", id))?
            .into();
        if let Some(name) = &changes.name {
            category::validate_name(name)?;
            am.name = Set(name.clone());
        }
        if let Some(parent) = changes.parent_category_id { am.parent_category_id = Set(parent); }
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn reparent_children(&self, parent_id: i32, new_parent: Option<i32>) -> Result<u64, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let res = category::Entity::update_many()
            .col_expr(category::Column::ParentCategoryId, Expr::value(new_parent))
            .col_expr(category::Column::UpdatedAt, Expr::value(now))
            .filter(category::Column::ParentCategoryId.eq(parent_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = category::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sqlite_db;

    #[tokio::test]
    async fn seaorm_category_repository_roundtrip() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCategoryRepository::new(sqlite_db().await?);

        let fiction = repo.insert("Fiction", None).await?;
        let scifi = repo.insert("Sci-Fi", Some(fiction.id)).await?;
        let fantasy = repo.insert("Fantasy", Some(fiction.id)).await?;

        let by_name = repo.find_by_name("Sci-Fi").await?.unwrap();
        assert_eq!(by_name, scifi);

        let children = repo.find_children(fiction.id).await?;
        assert_eq!(children.iter().map(|c| c.id).collect::<Vec<_>>(), vec![scifi.id, fantasy.id]);

        let some = repo.find_by_ids(&[fantasy.id, 999]).await?;
        assert_eq!(some, vec![fantasy.clone()]);

        let renamed = repo
            .update(scifi.id, &UpdateCategoryInput { name: Some("Science Fiction".into()), parent_category_id: None })
            .await?;
        assert_eq!(renamed.name, "Science Fiction");
        assert_eq!(renamed.parent_category_id, Some(fiction.id));

        let touched = repo.reparent_children(fiction.id, None).await?;
        assert_eq!(touched, 2);
        assert!(repo.find_children(fiction.id).await?.is_empty());
        assert_eq!(repo.find_by_id(fantasy.id).await?.unwrap().parent_category_id, None);

        assert!(repo.delete(fiction.id).await?);
        assert!(!repo.delete(fiction.id).await?);
        assert_eq!(repo.find_all().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_rename_onto_taken_name_is_conflict() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCategoryRepository::new(sqlite_db().await?);
        repo.insert("Drama", None).await?;
        let comedy = repo.insert("Comedy", None).await?;
        let err = repo
            .update(comedy.id, &UpdateCategoryInput { name: Some("Drama".into()), parent_category_id: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(repo.find_by_id(comedy.id).await?.unwrap().name, "Comedy");
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_update_of_missing_row_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCategoryRepository::new(sqlite_db().await?);
        let err = repo.update(41, &UpdateCategoryInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
