//! Category Tree Service: category records plus parent-pointer tree walks.
//!
//! Same three-layer split as the rest of the service crate (domain,
//! repository, service); `tree` holds the pure traversal engine.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;
pub mod tree;

pub use service::CategoryService;
