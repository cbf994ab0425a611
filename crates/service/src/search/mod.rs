//! Business search by category and subcategory name.

pub mod distance;
pub mod service;

pub use distance::{CoordinateSumPlaceholder, DistanceMetric};
pub use service::{BusinessSearchResult, SearchService};
