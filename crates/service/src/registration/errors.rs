use thiserror::Error;

/// Business errors for the registration workflow
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("a document file is required")]
    MissingDocument,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("geocoding failed: {0}")]
    Geocoding(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl RegistrationError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            RegistrationError::MissingDocument => 2001,
            RegistrationError::Validation(_) => 2002,
            RegistrationError::Geocoding(_) => 2101,
            RegistrationError::Storage(_) => 2201,
            RegistrationError::HashError(_) => 2202,
            RegistrationError::Repository(_) => 2300,
        }
    }
}

impl From<crate::errors::ServiceError> for RegistrationError {
    fn from(e: crate::errors::ServiceError) -> Self {
        use crate::errors::ServiceError;
        match e {
            ServiceError::Storage(m) => RegistrationError::Storage(m),
            ServiceError::Hash(m) => RegistrationError::HashError(m),
            ServiceError::Model(m) => m.into(),
        }
    }
}

impl From<models::errors::ModelError> for RegistrationError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(m) => RegistrationError::Validation(m),
            models::errors::ModelError::Db(m) => RegistrationError::Repository(m),
        }
    }
}
