use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use service::search::BusinessSearchResult;
use tracing::info;
use utoipa::IntoParams;

use crate::{errors::JsonApiError, state::ServerState};

/// Absent parameters search for the empty name.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact category name (case-sensitive)
    #[serde(default)]
    pub category: String,
    /// Exact subcategory name (case-sensitive)
    #[serde(default)]
    pub subcategory: String,
}

#[utoipa::path(
    get, path = "/search", tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching businesses ordered by id", body = [crate::openapi::BusinessSearchResultDoc]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<BusinessSearchResult>>, JsonApiError> {
    let found = state.search.search(&q.category, &q.subcategory).await?;
    info!(category = %q.category, subcategory = %q.subcategory, count = found.len(), "search");
    Ok(Json(found))
}
