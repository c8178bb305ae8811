#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, DatabaseConnection};

/// Fresh in-memory SQLite database with every migration applied.
///
/// The pool is pinned to one connection: each SQLite memory connection is
/// its own database.
pub async fn sqlite_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = models::db::connect_with_options(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
