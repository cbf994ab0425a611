use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use service::catalog_service::{self, CatalogEntry};
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/GetCategories", tag = "catalog",
    responses(
        (status = 200, description = "All categories", body = [crate::openapi::CatalogEntryDoc]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_categories(State(state): State<ServerState>) -> Result<Json<Vec<CatalogEntry>>, JsonApiError> {
    let list = catalog_service::list_categories(&state.db).await?;
    info!(count = list.len(), "list categories");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/GetSubCategories/{category_id}", tag = "catalog",
    params(("category_id" = i32, Path, description = "Owning category id")),
    responses(
        (status = 200, description = "Subcategories of the category; empty for unknown ids", body = [crate::openapi::CatalogEntryDoc]),
        (status = 400, description = "Category id is not an integer"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_sub_categories(
    State(state): State<ServerState>,
    category_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<CatalogEntry>>, JsonApiError> {
    let Path(category_id) = category_id.map_err(|e| JsonApiError::bad_request(e.body_text()))?;
    let list = catalog_service::list_sub_categories(&state.db, category_id).await?;
    info!(category_id, count = list.len(), "list subcategories");
    Ok(Json(list))
}
