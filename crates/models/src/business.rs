use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, JoinType, QueryOrder, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{category, sub_category};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "business")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub document: String,
    pub category_id: i32,
    pub sub_category_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    SubCategory,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::SubCategory => Entity::belongs_to(sub_category::Entity)
                .from(Column::SubCategoryId)
                .to(sub_category::Column::Id)
                .into(),
        }
    }
}

impl Related<sub_category::Entity> for Entity {
    fn to() -> RelationDef { Relation::SubCategory.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new row; `password_hash` must already be hashed.
#[derive(Clone)]
pub struct NewBusiness {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub description: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub document: String,
    pub category_id: i32,
    pub sub_category_id: i32,
}

impl std::fmt::Debug for NewBusiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewBusiness")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("location", &self.location)
            .field("document", &self.document)
            .field("category_id", &self.category_id)
            .field("sub_category_id", &self.sub_category_id)
            .finish()
    }
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    if trimmed.len() > 255 { return Err(errors::ModelError::Validation("email too long (<=255)".into())); }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if name.len() > 200 { return Err(errors::ModelError::Validation("name too long (<=200)".into())); }
    Ok(())
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), errors::ModelError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(errors::ModelError::Validation("latitude must be within [-90, 90]".into()));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(errors::ModelError::Validation("longitude must be within [-180, 180]".into()));
    }
    Ok(())
}

/// Insert guarded by the unique `(email, name)` index.
///
/// Returns `Ok(None)` when a row with the same email and name already exists;
/// the check and the write are one statement, so concurrent callers cannot
/// both succeed.
pub async fn insert_unless_registered(db: &DatabaseConnection, new: NewBusiness) -> Result<Option<i32>, errors::ModelError> {
    validate_name(&new.name)?;
    validate_email(&new.email)?;
    validate_coordinates(new.latitude, new.longitude)?;
    if new.password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }

    let am = ActiveModel {
        name: Set(new.name),
        email: Set(new.email),
        password_hash: Set(new.password_hash),
        description: Set(new.description),
        location: Set(new.location),
        latitude: Set(new.latitude),
        longitude: Set(new.longitude),
        document: Set(new.document),
        category_id: Set(new.category_id),
        sub_category_id: Set(new.sub_category_id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    let res = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::Email, Column::Name])
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await;

    match res {
        Ok(inserted) => Ok(Some(inserted.last_insert_id)),
        Err(DbErr::RecordNotInserted) => Ok(None),
        Err(e) => Err(errors::ModelError::Db(e.to_string())),
    }
}

/// Businesses whose category and subcategory names equal the given strings
/// exactly (case-sensitive), ordered by id.
pub async fn find_by_category_names(
    db: &DatabaseConnection,
    category_name: &str,
    sub_category_name: &str,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .join(JoinType::InnerJoin, Relation::SubCategory.def())
        .join(JoinType::InnerJoin, sub_category::Relation::Category.def())
        .filter(sub_category::Column::Name.eq(sub_category_name))
        .filter(category::Column::Name.eq(category_name))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(errors::ModelError::from)
}
