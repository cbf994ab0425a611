use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/{image_name}", tag = "media",
    params(("image_name" = String, Path, description = "Stored name returned at registration")),
    responses(
        (status = 200, description = "Raw bytes with the recorded content type"),
        (status = 404, description = "No such image")
    )
)]
pub async fn get_image(State(state): State<ServerState>, Path(image_name): Path<String>) -> Result<Response, JsonApiError> {
    match state.media.load(&image_name).await? {
        Some(file) => Ok(([(header::CONTENT_TYPE, file.content_type)], file.bytes).into_response()),
        None => {
            debug!(%image_name, "image not found");
            Ok(StatusCode::NOT_FOUND.into_response())
        }
    }
}
