use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{debug, instrument};

use models::business;
use super::distance::DistanceMetric;
use crate::errors::ServiceError;

/// Projection of a business returned by search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessSearchResult {
    pub business_id: i32,
    pub name: String,
    pub description: String,
    pub distance: f64,
    pub document: String,
}

pub struct SearchService {
    db: DatabaseConnection,
    metric: Arc<dyn DistanceMetric>,
}

impl SearchService {
    pub fn new(db: DatabaseConnection, metric: Arc<dyn DistanceMetric>) -> Self {
        Self { db, metric }
    }

    /// Businesses under exactly `category` / `subcategory` (case-sensitive), by id.
    #[instrument(skip(self))]
    pub async fn search(&self, category: &str, subcategory: &str) -> Result<Vec<BusinessSearchResult>, ServiceError> {
        let rows = business::find_by_category_names(&self.db, category, subcategory).await?;
        debug!(count = rows.len(), "search matched");
        Ok(rows
            .into_iter()
            .map(|b| BusinessSearchResult {
                business_id: b.id,
                distance: self.metric.distance(b.latitude, b.longitude),
                name: b.name,
                description: b.description,
                document: b.document,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CoordinateSumPlaceholder;
    use crate::test_support::{get_db, seed_catalog};
    use models::business::NewBusiness;

    fn row(category_id: i32, sub_category_id: i32, name: &str, lat: f64, lng: f64) -> NewBusiness {
        NewBusiness {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            description: format!("{name} description"),
            location: "somewhere".into(),
            latitude: lat,
            longitude: lng,
            document: format!("{:032x}.jpg", lat.to_bits()),
            category_id,
            sub_category_id,
        }
    }

    struct Fixed(f64);

    impl DistanceMetric for Fixed {
        fn distance(&self, _latitude: f64, _longitude: f64) -> f64 { self.0 }
    }

    #[tokio::test]
    async fn returns_exact_matches_with_placeholder_distance() -> anyhow::Result<()> {
        let (_dir, db) = get_db().await?;
        let c = seed_catalog(&db).await?;
        let a = business::insert_unless_registered(&db, row(c.food, c.bakery, "Crumbs", 12.5, 77.25)).await?.unwrap();
        business::insert_unless_registered(&db, row(c.food, c.cafe, "Beans", 1.0, 2.0)).await?;
        business::insert_unless_registered(&db, row(c.retail, c.books, "Pages", 3.0, 4.0)).await?;
        let d = business::insert_unless_registered(&db, row(c.food, c.bakery, "Loaf", -10.0, 5.5)).await?.unwrap();

        let svc = SearchService::new(db.clone(), Arc::new(CoordinateSumPlaceholder));
        let found = svc.search("Food", "Bakery").await?;

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].business_id, a);
        assert_eq!(found[0].name, "Crumbs");
        assert_eq!(found[0].description, "Crumbs description");
        assert_eq!(found[0].distance, 89.75);
        assert_eq!(found[1].business_id, d);
        assert_eq!(found[1].distance, -4.5);

        assert!(svc.search("Food", "Books").await?.is_empty());
        assert!(svc.search("FOOD", "Bakery").await?.is_empty());
        assert!(svc.search("", "").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn distance_goes_through_the_metric() -> anyhow::Result<()> {
        let (_dir, db) = get_db().await?;
        let c = seed_catalog(&db).await?;
        business::insert_unless_registered(&db, row(c.retail, c.books, "Pages", 3.0, 4.0)).await?;

        let svc = SearchService::new(db, Arc::new(Fixed(42.0)));
        let found = svc.search("Retail", "Books").await?;
        assert_eq!(found[0].distance, 42.0);

        let json = serde_json::to_value(&found[0])?;
        for key in ["business_id", "name", "description", "distance", "document"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("password_hash").is_none());
        Ok(())
    }
}
