use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}
