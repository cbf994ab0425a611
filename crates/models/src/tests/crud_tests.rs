use super::setup_test_db;
use crate::{business, category, errors::ModelError, sub_category};
use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait};

fn sample(category_id: i32, sub_category_id: i32, email: &str, name: &str) -> business::NewBusiness {
    business::NewBusiness {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        description: "Fresh bread daily".to_string(),
        location: "1 Main St".to_string(),
        latitude: 12.5,
        longitude: 77.25,
        document: "0f8fad5bd9cb469fa16570867728950e.jpg".to_string(),
        category_id,
        sub_category_id,
    }
}

/// Test category create + list ordering
#[tokio::test]
async fn test_category_create_and_list() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    let food = category::create(&db, "Food").await?;
    let retail = category::create(&db, "Retail").await?;

    let all = category::list(&db).await?;
    assert_eq!(all, vec![food.clone(), retail.clone()]);
    assert!(food.id < retail.id);

    // Blank names are rejected before touching the database
    let err = category::create(&db, "   ").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

/// Test subcategory filtering by owning category
#[tokio::test]
async fn test_sub_category_list_by_category() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;

    let food = category::create(&db, "Food").await?;
    let retail = category::create(&db, "Retail").await?;
    let bakery = sub_category::create(&db, food.id, "Bakery").await?;
    let cafe = sub_category::create(&db, food.id, "Cafe").await?;
    let _books = sub_category::create(&db, retail.id, "Books").await?;

    let subs = sub_category::list_by_category(&db, food.id).await?;
    assert_eq!(subs, vec![bakery.clone(), cafe]);

    let none = sub_category::list_by_category(&db, 9_999).await?;
    assert!(none.is_empty());

    assert!(sub_category::belongs_to_category(&db, bakery.id, food.id).await?);
    assert!(!sub_category::belongs_to_category(&db, bakery.id, retail.id).await?);
    assert!(!sub_category::belongs_to_category(&db, 9_999, food.id).await?);
    Ok(())
}

/// Test business insert guarded by the unique (email, name) index
#[tokio::test]
async fn test_business_insert_unless_registered() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    let food = category::create(&db, "Food").await?;
    let bakery = sub_category::create(&db, food.id, "Bakery").await?;

    let first = business::insert_unless_registered(&db, sample(food.id, bakery.id, "a@b.com", "Crumbs")).await?;
    let id = first.expect("first insert creates a row");

    let second = business::insert_unless_registered(&db, sample(food.id, bakery.id, "a@b.com", "Crumbs")).await?;
    assert!(second.is_none());

    // Same email with another name is a different registration
    let third = business::insert_unless_registered(&db, sample(food.id, bakery.id, "a@b.com", "Crumbs Two")).await?;
    assert!(third.is_some());

    assert_eq!(business::Entity::find().count(&db).await?, 2);
    let stored = business::Entity::find_by_id(id).one(&db).await?.expect("row exists");
    assert_eq!(stored.email, "a@b.com");
    assert_eq!(stored.sub_category_id, bakery.id);
    assert!(stored.password_hash.starts_with("$argon2id$"));
    Ok(())
}

/// Concurrent inserts of the same (email, name) produce exactly one row
#[tokio::test]
async fn test_business_concurrent_duplicate_inserts() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    let food = category::create(&db, "Food").await?;
    let bakery = sub_category::create(&db, food.id, "Bakery").await?;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let db = db.clone();
        let new = sample(food.id, bakery.id, "race@b.com", "Racer");
        handles.push(tokio::spawn(async move { business::insert_unless_registered(&db, new).await }));
    }
    let mut created = 0;
    for h in handles {
        if h.await??.is_some() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(business::Entity::find().count(&db).await?, 1);
    Ok(())
}

/// Foreign keys reject a subcategory that does not exist
#[tokio::test]
async fn test_business_requires_existing_sub_category() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    let food = category::create(&db, "Food").await?;

    let err = business::insert_unless_registered(&db, sample(food.id, 4_242, "fk@b.com", "Orphan"))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Db(_)));
    Ok(())
}

/// Name-based lookup joins both reference tables and matches exactly
#[tokio::test]
async fn test_business_find_by_category_names() -> Result<()> {
    let (_dir, db) = setup_test_db().await?;
    let food = category::create(&db, "Food").await?;
    let retail = category::create(&db, "Retail").await?;
    let bakery = sub_category::create(&db, food.id, "Bakery").await?;
    let cafe = sub_category::create(&db, food.id, "Cafe").await?;
    // same subcategory name under another category
    let retail_bakery = sub_category::create(&db, retail.id, "Bakery").await?;

    let a = business::insert_unless_registered(&db, sample(food.id, bakery.id, "a@b.com", "A")).await?.unwrap();
    business::insert_unless_registered(&db, sample(food.id, cafe.id, "b@b.com", "B")).await?;
    business::insert_unless_registered(&db, sample(retail.id, retail_bakery.id, "c@b.com", "C")).await?;
    let d = business::insert_unless_registered(&db, sample(food.id, bakery.id, "d@b.com", "D")).await?.unwrap();

    let found = business::find_by_category_names(&db, "Food", "Bakery").await?;
    assert_eq!(found.iter().map(|b| b.id).collect::<Vec<_>>(), vec![a, d]);

    assert!(business::find_by_category_names(&db, "food", "bakery").await?.is_empty());
    assert!(business::find_by_category_names(&db, "", "").await?.is_empty());
    Ok(())
}

#[test]
fn test_business_field_validation() {
    assert!(business::validate_email("owner@example.com").is_ok());
    assert!(business::validate_email("no-at-sign").is_err());
    assert!(business::validate_email("@example.com").is_err());
    assert!(business::validate_name("Crumbs").is_ok());
    assert!(business::validate_name(" ").is_err());
    assert!(business::validate_coordinates(-90.0, 180.0).is_ok());
    assert!(business::validate_coordinates(90.1, 0.0).is_err());
    assert!(business::validate_coordinates(0.0, f64::INFINITY).is_err());
}

#[test]
fn test_new_business_debug_redacts_hash() {
    let dbg = format!("{:?}", sample(1, 2, "a@b.com", "Crumbs"));
    assert!(dbg.contains("<redacted>"));
    assert!(!dbg.contains("argon2id"));
}
