use async_trait::async_trait;

use super::domain::{Category, UpdateCategoryInput};
use crate::errors::ServiceError;

/// Record-store primitives the Category Tree Service relies on.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError>;
    /// Rows whose id is in `ids`, ascending by id; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>, ServiceError>;
    /// All rows, ascending by id.
    async fn find_all(&self) -> Result<Vec<Category>, ServiceError>;
    /// Direct children of `parent_id`, ascending by id.
    async fn find_children(&self, parent_id: i32) -> Result<Vec<Category>, ServiceError>;
    /// Insert; a duplicate name is reported as `Conflict`.
    async fn insert(&self, name: &str, parent_category_id: Option<i32>) -> Result<Category, ServiceError>;
    /// Apply only the supplied fields.
    async fn update(&self, id: i32, changes: &UpdateCategoryInput) -> Result<Category, ServiceError>;
    /// Point every child of `parent_id` at `new_parent`; returns rows touched.
    async fn reparent_children(&self, parent_id: i32, new_parent: Option<i32>) -> Result<u64, ServiceError>;
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
        rows: BTreeMap<i32, Category>,
        last_id: i32,
    }

    /// Mirrors the store: ids are assigned from 1 and names are unique.
    #[derive(Default)]
    pub struct MockCategoryRepository {
        state: Mutex<State>,
    }

    impl MockCategoryRepository {
        /// Seed a row verbatim, bypassing every check. Lets tests build
        /// shapes the service would refuse, such as parent cycles.
        pub fn seed(&self, category: Category) {
            let mut state = self.state.lock().unwrap();
            state.last_id = state.last_id.max(category.id);
            state.rows.insert(category.id, category);
        }
    }

    #[async_trait]
    impl CategoryRepository for MockCategoryRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.get(&id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.values().find(|c| c.name == name).cloned())
        }

        async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.values().filter(|c| ids.contains(&c.id)).cloned().collect())
        }

        async fn find_all(&self) -> Result<Vec<Category>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.values().cloned().collect())
        }

        async fn find_children(&self, parent_id: i32) -> Result<Vec<Category>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.values().filter(|c| c.parent_category_id == Some(parent_id)).cloned().collect())
        }

        async fn insert(&self, name: &str, parent_category_id: Option<i32>) -> Result<Category, ServiceError> {
            let mut state = self.state.lock().unwrap();
            if state.rows.values().any(|c| c.name == name) {
                return Err(ServiceError::name_taken("category", name));
            }
            state.last_id += 1;
            let category = Category { id: state.last_id, name: name.to_string(), parent_category_id };
            state.rows.insert(category.id, category.clone());
            Ok(category)
        }

        async fn update(&self, id: i32, changes: &UpdateCategoryInput) -> Result<Category, ServiceError> {
            let mut state = self.state.lock().unwrap();
            if let Some(name) = &changes.name {
                if state.rows.values().any(|c| c.id != id && &c.name == name) {
                    return Err(ServiceError::name_taken("category", name));
                }
            }
            let row = state.rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("category", id))?;
            if let Some(name) = &changes.name { row.name = name.clone(); }
            if let Some(parent) = changes.parent_category_id { row.parent_category_id = parent; }
            Ok(row.clone())
        }

        async fn reparent_children(&self, parent_id: i32, new_parent: Option<i32>) -> Result<u64, ServiceError> {
            let mut state = self.state.lock().unwrap();
            let mut touched = 0;
            for row in state.rows.values_mut().filter(|c| c.parent_category_id == Some(parent_id)) {
                row.parent_category_id = new_parent;
                touched += 1;
            }
            Ok(touched)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut state = self.state.lock().unwrap();
            Ok(state.rows.remove(&id).is_some())
        }
    }
}
