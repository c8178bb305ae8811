use async_trait::async_trait;

use super::domain::{Book, CreateBookInput, UpdateBookInput};
use crate::errors::ServiceError;

/// Record-store primitives the Book Catalog Service relies on.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Book>, ServiceError>;
    /// All rows, ascending by id.
    async fn find_all(&self) -> Result<Vec<Book>, ServiceError>;
    /// Books in any of `category_ids`, ascending by id, `skip` rows dropped, at most `limit` kept.
    async fn find_by_category_ids(&self, category_ids: &[i32], skip: u64, limit: u64) -> Result<Vec<Book>, ServiceError>;
    /// Insert; a duplicate name is reported as `Conflict`.
    async fn insert(&self, input: &CreateBookInput) -> Result<Book, ServiceError>;
    /// Apply only the supplied fields.
    async fn update(&self, id: i32, changes: &UpdateBookInput) -> Result<Book, ServiceError>;
    /// Returns true if a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i32, Book>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockBookRepository {
        state: Mutex<State>,
    }

    #[async_trait]
    impl BookRepository for MockBookRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Book>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.get(&id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Book>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.values().find(|b| b.name == name).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Book>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.values().cloned().collect())
        }

        async fn find_by_category_ids(&self, category_ids: &[i32], skip: u64, limit: u64) -> Result<Vec<Book>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state
                .rows
                .values()
                .filter(|b| category_ids.contains(&b.category_id))
                .skip(skip as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn insert(&self, input: &CreateBookInput) -> Result<Book, ServiceError> {
            let mut state = self.state.lock().unwrap();
            if state.rows.values().any(|b| b.name == input.name) {
                return Err(ServiceError::name_taken("book", &input.name));
            }
            state.last_id += 1;
            let book = Book {
                id: state.last_id,
                name: input.name.clone(),
                author: input.author.clone(),
                category_id: input.category_id,
                description: input.description.clone(),
            };
            state.rows.insert(book.id, book.clone());
            Ok(book)
        }

        async fn update(&self, id: i32, changes: &UpdateBookInput) -> Result<Book, ServiceError> {
            let mut state = self.state.lock().unwrap();
            if let Some(name) = &changes.name {
                if state.rows.values().any(|b| b.id != id && &b.name == name) {
                    return Err(ServiceError::name_taken("book", name));
                }
            }
            let row = state.rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("book", id))?;
            if let Some(name) = &changes.name { row.name = name.clone(); }
            if let Some(author) = &changes.author { row.author = author.clone(); }
            if let Some(category_id) = changes.category_id { row.category_id = category_id; }
            if let Some(description) = &changes.description { row.description = description.clone(); }
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut state = self.state.lock().unwrap();
            Ok(state.rows.remove(&id).is_some())
        }
    }
}
