#![cfg(test)]
use migration::MigratorTrait;
use models::{category, sub_category};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Fresh, migrated SQLite database per test. Keep the `TempDir` alive while the
/// connection is in use.
pub async fn get_db() -> Result<(TempDir, DatabaseConnection), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("service.db").display());
    let db = models::db::connect(&url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((dir, db))
}

/// Ids of the reference rows created by [`seed_catalog`].
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub food: i32,
    pub retail: i32,
    pub bakery: i32,
    pub cafe: i32,
    pub books: i32,
}

/// Food{Bakery, Cafe}, Retail{Books}.
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<Catalog, anyhow::Error> {
    let food = category::create(db, "Food").await?;
    let retail = category::create(db, "Retail").await?;
    let bakery = sub_category::create(db, food.id, "Bakery").await?;
    let cafe = sub_category::create(db, food.id, "Cafe").await?;
    let books = sub_category::create(db, retail.id, "Books").await?;
    Ok(Catalog { food: food.id, retail: retail.id, bakery: bakery.id, cafe: cafe.id, books: books.id })
}
