/// CRUD operations tests for all models
pub mod crud_tests;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Throwaway SQLite database with all migrations applied.
/// Keep the returned `TempDir` alive for as long as the connection is used.
pub(crate) async fn setup_test_db() -> Result<(TempDir, DatabaseConnection)> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("models.db").display());
    let db = crate::db::connect(&url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((dir, db))
}
