use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::book::repo::seaorm::SeaOrmBookRepository;
use service::book::BookService;
use service::category::repo::seaorm::SeaOrmCategoryRepository;
use service::category::CategoryService;

pub type Categories = CategoryService<SeaOrmCategoryRepository>;
pub type Books = BookService<SeaOrmBookRepository, SeaOrmCategoryRepository>;

/// Shared handler state; both services run over one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<Categories>,
    pub books: Arc<Books>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let categories = Arc::new(CategoryService::new(Arc::new(SeaOrmCategoryRepository::new(db.clone()))));
        let books = Arc::new(BookService::new(Arc::new(SeaOrmBookRepository::new(db)), categories.clone()));
        Self { categories, books }
    }
}
