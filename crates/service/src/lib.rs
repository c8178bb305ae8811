//! Service layer providing the catalog's business operations on top of models.
//! - Separates business logic from data access (repository traits per aggregate).
//! - Reuses validation and entity definitions in `models` crate.
//! - Category tree walks live in `category::tree` and never touch the store.

pub mod errors;
pub mod pagination;
pub mod patch;
pub mod category;
pub mod book;
#[cfg(test)]
pub mod test_support;
