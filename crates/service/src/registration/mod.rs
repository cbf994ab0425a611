//! Registration module: three-layer architecture (domain, repository, service).
//!
//! Validates a business submission, stores its document, hashes the password
//! and performs the constrained insert.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::RegistrationService;
