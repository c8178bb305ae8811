/// Entity-level CRUD against an in-memory SQLite schema built by the migrator.
pub mod crud_tests;
