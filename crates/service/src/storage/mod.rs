//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores for small maps persisted as JSON.

pub mod json_map_store;
