//! Geocoding: free-text address to coordinate.
//!
//! `Geocoder` is the seam handlers and the registration workflow depend on;
//! `GoogleGeocoder` talks to the Google Maps Geocoding API.

mod google;

use async_trait::async_trait;
use common::types::Coordinate;
use thiserror::Error;

pub use google::GoogleGeocoder;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(String),
    #[error("geocoding provider returned {status}: {message}")]
    Provider { status: String, message: String },
    #[error("cannot decode geocoding response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` for blank or unresolvable addresses.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError>;
}
