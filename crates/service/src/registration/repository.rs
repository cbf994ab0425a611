use async_trait::async_trait;
use models::business::NewBusiness;

use super::errors::RegistrationError;

/// Repository abstraction for registration persistence.
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// True when the subcategory exists and is owned by the category.
    async fn sub_category_belongs_to(&self, sub_category_id: i32, category_id: i32) -> Result<bool, RegistrationError>;

    /// Insert unless `(email, name)` is taken; `Ok(None)` on conflict.
    async fn insert_unless_registered(&self, new: NewBusiness) -> Result<Option<i32>, RegistrationError>;
}
