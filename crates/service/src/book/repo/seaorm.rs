use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use models::book;

use crate::book::domain::{Book, CreateBookInput, UpdateBookInput};
use crate::book::repository::BookRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmBookRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, ServiceError> {
        Ok(book::Entity::find_by_id(id).one(&self.db).await?.map(Book::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Book>, ServiceError> {
        let found = book::Entity::find()
            .filter(book::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found.map(Book::from))
    }

    async fn find_all(&self) -> Result<Vec<Book>, ServiceError> {
        let rows = book::Entity::find().order_by_asc(book::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_category_ids(&self, category_ids: &[i32], skip: u64, limit: u64) -> Result<Vec<Book>, ServiceError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = book::Entity::find()
            .filter(book::Column::CategoryId.is_in(category_ids.iter().copied()))
            .order_by_asc(book::Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn insert(&self, input: &CreateBookInput) -> Result<Book, ServiceError> {
        let created = book::create(
            &self.db,
            &input.name,
            &input.author,
            input.category_id,
            input.description.as_deref(),
        )
        .await?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, changes: &UpdateBookInput) -> Result<Book, ServiceError> {
        let mut am: book::ActiveModel = book::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("book", id))?
            .into();
        if let Some(name) = &changes.name {
            book::validate_name(name)?;
            am.name = Set(name.clone());
        }
        if let Some(author) = &changes.author {
            book::validate_author(author)?;
            am.author = Set(author.clone());
        }
        if let Some(category_id) = changes.category_id { am.category_id = Set(category_id); }
        if let Some(description) = &changes.description { am.description = Set(description.clone()); }
        am.updated_at = Set(Utc::now().into());
        Ok(am.update(&self.db).await?.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = book::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
