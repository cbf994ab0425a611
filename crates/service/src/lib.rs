//! Service layer for the business directory.
//! - Separates business logic from data access and from the HTTP framework.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod password;
pub mod catalog_service;
pub mod media;
pub mod geocoding;
pub mod registration;
pub mod search;
