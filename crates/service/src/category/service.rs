use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Category, CreateCategoryInput, UpdateCategoryInput};
use super::repository::CategoryRepository;
use super::tree::CategoryTree;
use crate::errors::ServiceError;

/// Category Tree Service: CRUD with uniqueness and parent checks, plus the
/// tree walks the book catalog builds on. Independent of web framework.
pub struct CategoryService<R: CategoryRepository> {
    repo: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a category, optionally under an existing parent.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::category::{CategoryService, repository::mock::MockCategoryRepository};
    /// use service::category::domain::CreateCategoryInput;
    /// let svc = CategoryService::new(Arc::new(MockCategoryRepository::default()));
    /// let root = tokio_test::block_on(svc.create(CreateCategoryInput { name: "Fiction".into(), parent_category_id: None })).unwrap();
    /// assert_eq!(root.parent_category_id, None);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateCategoryInput) -> Result<Category, ServiceError> {
        models::category::validate_name(&input.name)?;
        if self.repo.find_by_name(&input.name).await?.is_some() {
            return Err(ServiceError::name_taken("category", &input.name));
        }
        if let Some(parent) = input.parent_category_id {
            self.find_one(parent).await?;
        }
        let created = self.repo.insert(&input.name, input.parent_category_id).await?;
        info!(category_id = created.id, parent_category_id = ?created.parent_category_id, "category_created");
        Ok(created)
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, ServiceError> {
        self.repo.find_all().await
    }

    pub async fn find_one(&self, id: i32) -> Result<Category, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("category", id))
    }

    /// Batched lookup; unknown ids are skipped.
    pub async fn find_many(&self, ids: &[i32]) -> Result<Vec<Category>, ServiceError> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        self.repo.find_by_ids(&ids).await
    }

    /// Rename and/or re-parent. Rejects self-parenting and any parent that
    /// already sits below this category.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateCategoryInput) -> Result<Category, ServiceError> {
        self.find_one(id).await?;

        if let Some(name) = &input.name {
            models::category::validate_name(name)?;
            if let Some(existing) = self.repo.find_by_name(name).await? {
                if existing.id != id {
                    return Err(ServiceError::name_taken("category", name));
                }
            }
        }

        if let Some(Some(parent)) = input.parent_category_id {
            if parent == id {
                return Err(ServiceError::BadRequest("a category cannot be its own parent".into()));
            }
            self.find_one(parent).await?;
            if self.tree().await?.is_ancestor(id, parent) {
                return Err(ServiceError::BadRequest(format!(
                    "category {parent} is a descendant of {id}; re-parenting would create a cycle"
                )));
            }
        }

        let updated = self.repo.update(id, &input).await?;
        info!(category_id = id, "category_updated");
        Ok(updated)
    }

    /// Delete a category. Its direct children become roots; books are untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.find_one(id).await?;
        let promoted = self.repo.reparent_children(id, None).await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("category", id));
        }
        info!(category_id = id, promoted, "category_deleted");
        Ok(())
    }

    /// Direct children only.
    pub async fn subcategories(&self, parent_id: i32) -> Result<Vec<Category>, ServiceError> {
        self.repo.find_children(parent_id).await
    }

    /// Ids of every category below `parent_id`, pre-order, `parent_id` excluded.
    /// An unknown id simply has no descendants.
    pub async fn all_subcategory_ids(&self, parent_id: i32) -> Result<Vec<i32>, ServiceError> {
        let ids = self.tree().await?.descendant_ids(parent_id);
        debug!(parent_id, count = ids.len(), "collected subcategory ids");
        Ok(ids)
    }

    /// Top-down breadcrumbs: one `" > "`-joined path from this category to
    /// each leaf below it, or just its own name when it is a leaf.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::category::{CategoryService, repository::mock::MockCategoryRepository};
    /// use service::category::domain::CreateCategoryInput;
    /// let svc = CategoryService::new(Arc::new(MockCategoryRepository::default()));
    /// let add = |name: &str, parent| tokio_test::block_on(svc.create(CreateCategoryInput { name: name.into(), parent_category_id: parent })).unwrap();
    /// let x = add("X", None);
    /// let a = add("A", Some(x.id));
    /// add("B", Some(a.id));
    /// add("C", Some(a.id));
    /// let paths = tokio_test::block_on(svc.descendant_leaf_paths(x.id)).unwrap();
    /// assert_eq!(paths, vec!["X > A > B", "X > A > C"]);
    /// ```
    pub async fn descendant_leaf_paths(&self, id: i32) -> Result<Vec<String>, ServiceError> {
        self.tree()
            .await?
            .descendant_leaf_paths(id)
            .ok_or_else(|| ServiceError::not_found("category", id))
    }

    /// Bottom-up breadcrumb from the root down to this category.
    pub async fn ancestor_path(&self, id: i32) -> Result<String, ServiceError> {
        self.tree()
            .await?
            .ancestor_path(id)
            .ok_or_else(|| ServiceError::not_found("category", id))
    }

    /// Snapshot of the whole forest; one store round-trip per walk.
    pub async fn tree(&self) -> Result<CategoryTree, ServiceError> {
        Ok(CategoryTree::new(self.repo.find_all().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::repository::mock::MockCategoryRepository;

    fn svc() -> (Arc<MockCategoryRepository>, CategoryService<MockCategoryRepository>) {
        let repo = Arc::new(MockCategoryRepository::default());
        (repo.clone(), CategoryService::new(repo))
    }

    fn input(name: &str, parent: Option<i32>) -> CreateCategoryInput {
        CreateCategoryInput { name: name.into(), parent_category_id: parent }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_normalizes_parent() {
        let (_, svc) = svc();
        let fiction = svc.create(input("Fiction", None)).await.unwrap();
        let scifi = svc.create(input("Sci-Fi", Some(fiction.id))).await.unwrap();
        assert_eq!(fiction.id, 1);
        assert_eq!(scifi.id, 2);
        assert_eq!(fiction.parent_category_id, None);
        assert_eq!(scifi.parent_category_id, Some(1));
    }

    #[tokio::test]
    async fn create_duplicate_name_conflicts() {
        let (_, svc) = svc();
        svc.create(input("Poetry", None)).await.unwrap();
        let err = svc.create(input("Poetry", None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_with_missing_parent_is_not_found() {
        let (_, svc) = svc();
        let err = svc.create(input("Orphan", Some(77))).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_blank_name_is_bad_request() {
        let (_, svc) = svc();
        let err = svc.create(input("  ", None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn find_one_is_stable_without_writes() {
        let (_, svc) = svc();
        let c = svc.create(input("History", None)).await.unwrap();
        let first = svc.find_one(c.id).await.unwrap();
        let second = svc.find_one(c.id).await.unwrap();
        assert_eq!(first, second);
        assert!(matches!(svc.find_one(404).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rejects_self_parent() {
        let (_, svc) = svc();
        let root = svc.create(input("Fiction", None)).await.unwrap();
        let child = svc.create(input("Sci-Fi", Some(root.id))).await.unwrap();
        let err = svc
            .update(child.id, UpdateCategoryInput { name: None, parent_category_id: Some(Some(child.id)) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn update_rejects_descendant_as_parent() {
        let (_, svc) = svc();
        let a = svc.create(input("A", None)).await.unwrap();
        let b = svc.create(input("B", Some(a.id))).await.unwrap();
        let c = svc.create(input("C", Some(b.id))).await.unwrap();
        let err = svc
            .update(a.id, UpdateCategoryInput { name: None, parent_category_id: Some(Some(c.id)) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        assert_eq!(svc.find_one(a.id).await.unwrap().parent_category_id, None);
    }

    #[tokio::test]
    async fn update_name_conflicts_only_with_other_rows() {
        let (_, svc) = svc();
        let a = svc.create(input("Drama", None)).await.unwrap();
        svc.create(input("Comedy", None)).await.unwrap();

        let same = svc
            .update(a.id, UpdateCategoryInput { name: Some("Drama".into()), parent_category_id: None })
            .await
            .unwrap();
        assert_eq!(same.name, "Drama");

        let err = svc
            .update(a.id, UpdateCategoryInput { name: Some("Comedy".into()), parent_category_id: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_missing_parent_or_row_is_not_found() {
        let (_, svc) = svc();
        let a = svc.create(input("Travel", None)).await.unwrap();
        let err = svc
            .update(a.id, UpdateCategoryInput { name: None, parent_category_id: Some(Some(55)) })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = svc.update(99, UpdateCategoryInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_distinguishes_absent_and_null_parent() {
        let (_, svc) = svc();
        let root = svc.create(input("Science", None)).await.unwrap();
        let child = svc.create(input("Physics", Some(root.id))).await.unwrap();

        let renamed = svc
            .update(child.id, UpdateCategoryInput { name: Some("Physics & Astronomy".into()), parent_category_id: None })
            .await
            .unwrap();
        assert_eq!(renamed.parent_category_id, Some(root.id));

        let promoted = svc
            .update(child.id, UpdateCategoryInput { name: None, parent_category_id: Some(None) })
            .await
            .unwrap();
        assert_eq!(promoted.parent_category_id, None);
    }

    #[tokio::test]
    async fn parent_id_zero_is_an_ordinary_id() {
        let (repo, svc) = svc();
        repo.seed(Category { id: 0, name: "Zero".into(), parent_category_id: None });
        let other = svc.create(input("Other", None)).await.unwrap();
        let moved = svc
            .update(other.id, UpdateCategoryInput { name: None, parent_category_id: Some(Some(0)) })
            .await
            .unwrap();
        assert_eq!(moved.parent_category_id, Some(0));
    }

    #[tokio::test]
    async fn delete_promotes_children_to_roots() {
        let (_, svc) = svc();
        let root = svc.create(input("Fiction", None)).await.unwrap();
        let a = svc.create(input("Sci-Fi", Some(root.id))).await.unwrap();
        let b = svc.create(input("Fantasy", Some(root.id))).await.unwrap();
        let grandchild = svc.create(input("Space Opera", Some(a.id))).await.unwrap();

        svc.delete(root.id).await.unwrap();

        assert_eq!(svc.find_one(a.id).await.unwrap().parent_category_id, None);
        assert_eq!(svc.find_one(b.id).await.unwrap().parent_category_id, None);
        assert_eq!(svc.find_one(grandchild.id).await.unwrap().parent_category_id, Some(a.id));
        assert!(svc.find_all().await.unwrap().iter().all(|c| c.id != root.id));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_, svc) = svc();
        assert!(matches!(svc.delete(12).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn subcategory_ids_cover_whole_subtree_once() {
        let (_, svc) = svc();
        let x = svc.create(input("X", None)).await.unwrap();
        let a = svc.create(input("A", Some(x.id))).await.unwrap();
        let b = svc.create(input("B", Some(x.id))).await.unwrap();
        let c = svc.create(input("C", Some(a.id))).await.unwrap();

        let direct = svc.subcategories(x.id).await.unwrap();
        assert_eq!(direct.iter().map(|c| c.id).collect::<Vec<_>>(), vec![a.id, b.id]);

        let mut ids = svc.all_subcategory_ids(x.id).await.unwrap();
        assert_eq!(ids, vec![a.id, c.id, b.id]);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn breadcrumbs_for_leaf_and_branch() {
        let (_, svc) = svc();
        let x = svc.create(input("X", None)).await.unwrap();
        let a = svc.create(input("A", Some(x.id))).await.unwrap();
        let b = svc.create(input("B", Some(a.id))).await.unwrap();
        svc.create(input("C", Some(a.id))).await.unwrap();

        assert_eq!(svc.descendant_leaf_paths(b.id).await.unwrap(), vec!["B"]);
        assert_eq!(svc.descendant_leaf_paths(x.id).await.unwrap(), vec!["X > A > B", "X > A > C"]);
        assert_eq!(svc.ancestor_path(b.id).await.unwrap(), "X > A > B");
        assert!(matches!(svc.descendant_leaf_paths(500).await.unwrap_err(), ServiceError::NotFound(_)));
        assert!(matches!(svc.ancestor_path(500).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn traversals_survive_cyclic_rows() {
        let (repo, svc) = svc();
        repo.seed(Category { id: 1, name: "One".into(), parent_category_id: Some(2) });
        repo.seed(Category { id: 2, name: "Two".into(), parent_category_id: Some(1) });
        assert_eq!(svc.all_subcategory_ids(1).await.unwrap(), vec![2]);
        assert_eq!(svc.descendant_leaf_paths(1).await.unwrap(), vec!["One > Two"]);
        assert_eq!(svc.ancestor_path(1).await.unwrap(), "Two > One");
    }
}
