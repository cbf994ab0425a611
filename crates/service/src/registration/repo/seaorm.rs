use sea_orm::DatabaseConnection;

use crate::registration::errors::RegistrationError;
use crate::registration::repository::BusinessRepository;
use models::business::NewBusiness;

pub struct SeaOrmBusinessRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl BusinessRepository for SeaOrmBusinessRepository {
    async fn sub_category_belongs_to(&self, sub_category_id: i32, category_id: i32) -> Result<bool, RegistrationError> {
        models::sub_category::belongs_to_category(&self.db, sub_category_id, category_id)
            .await
            .map_err(RegistrationError::from)
    }

    async fn insert_unless_registered(&self, new: NewBusiness) -> Result<Option<i32>, RegistrationError> {
        models::business::insert_unless_registered(&self.db, new)
            .await
            .map_err(RegistrationError::from)
    }
}
