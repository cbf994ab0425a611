use std::time::Duration;

use async_trait::async_trait;
use common::types::Coordinate;
use configs::GeocodingConfig;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{GeocodeError, Geocoder};

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Client for `GET {base_url}?address=..&key=..`.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(cfg: &GeocodingConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| GeocodeError::Http(e.to_string()))?;
        Ok(Self { client, base_url: cfg.base_url.clone(), api_key: cfg.api_key.clone() })
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(None);
        }

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            // the request URL carries the key; keep it out of errors and logs
            .map_err(|e| GeocodeError::Http(e.without_url().to_string()))?
            .error_for_status()
            .map_err(|e| GeocodeError::Http(e.without_url().to_string()))?;

        let body: GeocodeResponse = resp
            .json()
            .await
            .map_err(|e| GeocodeError::Decode(e.without_url().to_string()))?;

        match body.status.as_str() {
            "OK" => {
                let found = body.results.into_iter().next().map(|r| Coordinate {
                    latitude: r.geometry.location.lat,
                    longitude: r.geometry.location.lng,
                });
                debug!(found = found.is_some(), "geocode resolved");
                Ok(found)
            }
            "ZERO_RESULTS" => Ok(None),
            other => Err(GeocodeError::Provider {
                status: other.to_string(),
                message: body.error_message.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    /// Local stand-in for the provider: answers by address.
    async fn provider(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
        if q.get("key").map(String::as_str) != Some("test-key") {
            return Json(json!({"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "results": []}));
        }
        match q.get("address").map(String::as_str) {
            Some("1600 Amphitheatre Parkway") => Json(json!({
                "status": "OK",
                "results": [
                    {"geometry": {"location": {"lat": 37.4224764, "lng": -122.0842499}}},
                    {"geometry": {"location": {"lat": 1.0, "lng": 2.0}}}
                ]
            })),
            Some("garbage") => Json(json!({"unexpected": true})),
            _ => Json(json!({"status": "ZERO_RESULTS", "results": []})),
        }
    }

    async fn start_provider() -> anyhow::Result<String> {
        let app = Router::new()
            .route("/geocode/json", get(provider))
            .route("/broken/json", get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "down") }));
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{}", addr))
    }

    fn geocoder(base: &str, path: &str, key: &str) -> GoogleGeocoder {
        let cfg = GeocodingConfig { api_key: key.into(), base_url: format!("{base}{path}"), timeout_secs: 5 };
        GoogleGeocoder::new(&cfg).expect("client")
    }

    #[tokio::test]
    async fn resolves_first_result() -> anyhow::Result<()> {
        let base = start_provider().await?;
        let g = geocoder(&base, "/geocode/json", "test-key");
        let c = g.geocode("1600 Amphitheatre Parkway").await?.expect("coordinate");
        assert_eq!(c, Coordinate { latitude: 37.4224764, longitude: -122.0842499 });
        Ok(())
    }

    #[tokio::test]
    async fn unresolvable_and_blank_addresses_are_not_found() -> anyhow::Result<()> {
        let base = start_provider().await?;
        let g = geocoder(&base, "/geocode/json", "test-key");
        assert!(g.geocode("nowhere at all").await?.is_none());
        assert!(g.geocode("").await?.is_none());
        assert!(g.geocode("   ").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn blank_address_makes_no_request() -> anyhow::Result<()> {
        // nothing listens on this port
        let g = geocoder("http://127.0.0.1:9", "/geocode/json", "test-key");
        assert!(g.geocode("").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn provider_failures_are_errors() -> anyhow::Result<()> {
        let base = start_provider().await?;

        let denied = geocoder(&base, "/geocode/json", "wrong-key").geocode("1600 Amphitheatre Parkway").await;
        match denied {
            Err(GeocodeError::Provider { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert!(message.contains("invalid"));
            }
            other => panic!("unexpected: {other:?}"),
        }

        let down = geocoder(&base, "/broken/json", "test-key").geocode("anything").await;
        assert!(matches!(down, Err(GeocodeError::Http(_))));

        let garbled = geocoder(&base, "/geocode/json", "test-key").geocode("garbage").await;
        assert!(matches!(garbled, Err(GeocodeError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn errors_do_not_leak_the_api_key() -> anyhow::Result<()> {
        let base = start_provider().await?;
        let err = geocoder(&base, "/broken/json", "super-secret-key")
            .geocode("anything")
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("super-secret-key"));
        Ok(())
    }
}
