use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Book, BookDetail, BookWithBreadcrumbs, CreateBookInput, UpdateBookInput};
use super::repository::BookRepository;
use crate::category::repository::CategoryRepository;
use crate::category::CategoryService;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Book Catalog Service. Category references are resolved through the
/// Category Tree Service; the store keeps no foreign key on books.
pub struct BookService<B: BookRepository, C: CategoryRepository> {
    repo: Arc<B>,
    categories: Arc<CategoryService<C>>,
}

impl<B: BookRepository, C: CategoryRepository> BookService<B, C> {
    pub fn new(repo: Arc<B>, categories: Arc<CategoryService<C>>) -> Self { Self { repo, categories } }

    /// Create a book in an existing category.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::book::{BookService, repository::mock::MockBookRepository, domain::CreateBookInput};
    /// use service::category::{CategoryService, repository::mock::MockCategoryRepository, domain::CreateCategoryInput};
    /// let categories = Arc::new(CategoryService::new(Arc::new(MockCategoryRepository::default())));
    /// let books = BookService::new(Arc::new(MockBookRepository::default()), categories.clone());
    /// let scifi = tokio_test::block_on(categories.create(CreateCategoryInput { name: "Sci-Fi".into(), parent_category_id: None })).unwrap();
    /// let dune = tokio_test::block_on(books.create(CreateBookInput {
    ///     name: "Dune".into(), author: "Frank Herbert".into(), category_id: scifi.id, description: None,
    /// })).unwrap();
    /// assert_eq!(dune.category_id, scifi.id);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name, category_id = input.category_id))]
    pub async fn create(&self, input: CreateBookInput) -> Result<Book, ServiceError> {
        models::book::validate_name(&input.name)?;
        models::book::validate_author(&input.author)?;
        if self.repo.find_by_name(&input.name).await?.is_some() {
            return Err(ServiceError::name_taken("book", &input.name));
        }
        self.categories.find_one(input.category_id).await?;
        let created = self.repo.insert(&input).await?;
        info!(book_id = created.id, category_id = created.category_id, "book_created");
        Ok(created)
    }

    /// Every book with its category, resolved in one batched lookup.
    pub async fn find_all(&self) -> Result<Vec<BookDetail>, ServiceError> {
        let books = self.repo.find_all().await?;
        let ids: Vec<i32> = books.iter().map(|b| b.category_id).collect();
        let by_id: HashMap<i32, _> = self
            .categories
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        Ok(books
            .into_iter()
            .map(|book| {
                let category = by_id.get(&book.category_id).cloned();
                BookDetail { book, category }
            })
            .collect())
    }

    pub async fn find_one(&self, id: i32) -> Result<BookDetail, ServiceError> {
        let book = self.find_book(id).await?;
        let category = self.categories.find_many(&[book.category_id]).await?.into_iter().next();
        Ok(BookDetail { book, category })
    }

    /// Book plus top-down breadcrumbs and the root-to-category path.
    #[instrument(skip(self))]
    pub async fn find_one_with_breadcrumbs(&self, id: i32) -> Result<BookWithBreadcrumbs, ServiceError> {
        let BookDetail { book, category } = self.find_one(id).await?;
        let Some(category) = category else {
            return Err(ServiceError::NotFound(format!("category not found for book {id}")));
        };
        let tree = self.categories.tree().await?;
        let breadcrumbs = tree
            .descendant_leaf_paths(category.id)
            .ok_or_else(|| ServiceError::not_found("category", category.id))?;
        let ancestor_path = tree
            .ancestor_path(category.id)
            .ok_or_else(|| ServiceError::not_found("category", category.id))?;
        Ok(BookWithBreadcrumbs { book, breadcrumbs, ancestor_path })
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateBookInput) -> Result<Book, ServiceError> {
        self.find_book(id).await?;
        if let Some(name) = &input.name {
            models::book::validate_name(name)?;
            if let Some(existing) = self.repo.find_by_name(name).await? {
                if existing.id != id {
                    return Err(ServiceError::name_taken("book", name));
                }
            }
        }
        if let Some(author) = &input.author {
            models::book::validate_author(author)?;
        }
        if let Some(category_id) = input.category_id {
            self.categories.find_one(category_id).await?;
        }
        let updated = self.repo.update(id, &input).await?;
        info!(book_id = id, "book_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("book", id));
        }
        info!(book_id = id, "book_deleted");
        Ok(())
    }

    /// Books filed under `category_id` or anywhere below it, ordered by id.
    #[instrument(skip(self))]
    pub async fn find_by_category_and_subcategories(
        &self,
        category_id: i32,
        page: Pagination,
    ) -> Result<Vec<Book>, ServiceError> {
        let (skip, limit) = page.normalize()?;
        self.categories.find_one(category_id).await?;
        let mut ids = vec![category_id];
        ids.extend(self.categories.all_subcategory_ids(category_id).await?);
        let books = self.repo.find_by_category_ids(&ids, skip, limit).await?;
        info!(category_id, categories = ids.len(), returned = books.len(), "books_listed_by_subtree");
        Ok(books)
    }

    async fn find_book(&self, id: i32) -> Result<Book, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("book", id))
    }
}
