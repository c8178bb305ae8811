//! Book Catalog Service: book records, category lookups and subtree listings.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::BookService;
