use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::IntoParams;

use crate::state::ServerState;

pub const GEOCODING_FAILED: &str = "Geocoding failed.";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GeocodeQuery {
    /// Free-text address
    #[serde(default)]
    pub address: String,
}

/// Provider failures are reported like unresolvable addresses, with a warning logged.
#[utoipa::path(
    get, path = "/geocode", tag = "geocode",
    params(GeocodeQuery),
    responses(
        (status = 200, description = "Coordinate of the first match", body = crate::openapi::CoordinateDoc),
        (status = 404, description = "Blank, unresolvable, or provider failure", body = String)
    )
)]
pub async fn geocode(State(state): State<ServerState>, Query(q): Query<GeocodeQuery>) -> Response {
    match state.geocoder.geocode(&q.address).await {
        Ok(Some(coordinate)) => {
            info!(latitude = coordinate.latitude, longitude = coordinate.longitude, "geocode resolved");
            Json(coordinate).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, Json(GEOCODING_FAILED)).into_response(),
        Err(e) => {
            warn!(error = %e, "geocoding provider error");
            (StatusCode::NOT_FOUND, Json(GEOCODING_FAILED)).into_response()
        }
    }
}
