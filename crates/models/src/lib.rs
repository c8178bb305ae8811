//! SeaORM entities for the catalog plus the field rules every writer shares.

pub mod errors;
pub mod db;
pub mod category;
pub mod book;

#[cfg(test)]
mod tests;
