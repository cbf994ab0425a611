use sea_orm::DatabaseConnection;
use serde::Serialize;

use models::{category, sub_category};
use crate::errors::ServiceError;

/// `{id, name}` view shared by categories and subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub name: String,
}

impl From<category::Model> for CatalogEntry {
    fn from(m: category::Model) -> Self { Self { id: m.id, name: m.name } }
}

impl From<sub_category::Model> for CatalogEntry {
    fn from(m: sub_category::Model) -> Self { Self { id: m.id, name: m.name } }
}

/// List all categories.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<CatalogEntry>, ServiceError> {
    let rows = category::list(db).await?;
    Ok(rows.into_iter().map(CatalogEntry::from).collect())
}

/// List subcategories of one category. Unknown ids yield an empty list.
pub async fn list_sub_categories(db: &DatabaseConnection, category_id: i32) -> Result<Vec<CatalogEntry>, ServiceError> {
    let rows = sub_category::list_by_category(db, category_id).await?;
    Ok(rows.into_iter().map(CatalogEntry::from).collect())
}
