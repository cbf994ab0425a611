/// Distance value reported for a business in search results.
pub trait DistanceMetric: Send + Sync {
    fn distance(&self, latitude: f64, longitude: f64) -> f64;
}

/// PLACEHOLDER: reports `latitude + longitude`, which is not a distance.
///
/// Kept so existing clients see the values they always have. Replace with a
/// geodesic metric from a reference point once the search request carries one.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateSumPlaceholder;

impl DistanceMetric for CoordinateSumPlaceholder {
    fn distance(&self, latitude: f64, longitude: f64) -> f64 {
        latitude + longitude
    }
}
