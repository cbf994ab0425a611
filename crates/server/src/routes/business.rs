use axum::{
    extract::{multipart::Field, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use service::registration::{
    domain::{DocumentUpload, RegisterBusinessInput, RegistrationOutcome},
    errors::RegistrationError,
};
use tracing::{info, warn};

use crate::{errors::JsonApiError, state::ServerState};

pub const ALREADY_REGISTERED: &str = "Email is already registered.";

/// Text parts of the registration form, before type checks.
#[derive(Debug, Default)]
struct RegistrationForm {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    description: Option<String>,
    location: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    category_id: Option<String>,
    sub_category_id: Option<String>,
}

impl RegistrationForm {
    /// Field names match case-insensitively with underscores ignored
    /// (`CategoryId`, `category_id` and `categoryid` are the same field).
    fn set(&mut self, field_name: &str, value: String) {
        let key: String = field_name.chars().filter(|c| *c != '_').collect::<String>().to_ascii_lowercase();
        let slot = match key.as_str() {
            "name" => &mut self.name,
            "email" | "emailid" => &mut self.email,
            "password" => &mut self.password,
            "description" => &mut self.description,
            "location" => &mut self.location,
            "latitude" => &mut self.latitude,
            "longitude" => &mut self.longitude,
            "categoryid" => &mut self.category_id,
            "subcategoryid" => &mut self.sub_category_id,
            _ => return,
        };
        *slot = Some(value);
    }

    fn into_input(self) -> Result<RegisterBusinessInput, JsonApiError> {
        Ok(RegisterBusinessInput {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            latitude: parse_optional("latitude", self.latitude)?,
            longitude: parse_optional("longitude", self.longitude)?,
            category_id: parse_required("category_id", self.category_id)?,
            sub_category_id: parse_required("sub_category_id", self.sub_category_id)?,
        })
    }
}

fn parse_optional<T: std::str::FromStr>(field: &str, raw: Option<String>) -> Result<Option<T>, JsonApiError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| JsonApiError::bad_request(format!("{field} must be a number"))),
    }
}

fn parse_required<T: std::str::FromStr>(field: &str, raw: Option<String>) -> Result<T, JsonApiError> {
    parse_optional(field, raw)?.ok_or_else(|| JsonApiError::bad_request(format!("{field} is required")))
}

async fn read_document(field: Field<'_>, file_name: String) -> Result<DocumentUpload, JsonApiError> {
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| JsonApiError::new(e.status(), "Bad Request", Some(e.body_text())))?;
    Ok(DocumentUpload { file_name, content_type, bytes: bytes.to_vec() })
}

fn missing_document() -> Response {
    (StatusCode::BAD_REQUEST, Json(false)).into_response()
}

/// Register a business from a multipart form.
///
/// The first part carrying a file name is the document; further file parts
/// are ignored.
#[utoipa::path(
    post, path = "/", tag = "business",
    request_body(content = crate::openapi::RegisterBusinessForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "`true` when registered, or the already-registered message", body = crate::openapi::RegisterResponseDoc),
        (status = 400, description = "`false` without a document, or a JSON error for invalid fields"),
        (status = 502, description = "Geocoding provider unavailable"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(State(state): State<ServerState>, mut multipart: Multipart) -> Result<Response, JsonApiError> {
    let mut form = RegistrationForm::default();
    let mut document: Option<DocumentUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| JsonApiError::new(e.status(), "Bad Request", Some(e.body_text())))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        match file_name {
            Some(file_name) if document.is_none() => {
                document = Some(read_document(field, file_name).await?);
            }
            Some(file_name) => {
                warn!(%file_name, "ignoring extra file part");
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| JsonApiError::new(e.status(), "Bad Request", Some(e.body_text())))?;
                form.set(&field_name, value);
            }
        }
    }

    let Some(document) = document else {
        info!("registration without document");
        return Ok(missing_document());
    };
    let input = form.into_input()?;

    match state.registration.register(input, Some(document)).await {
        Ok(RegistrationOutcome::Registered { business_id, .. }) => {
            info!(business_id, "registration accepted");
            Ok(Json(true).into_response())
        }
        Ok(RegistrationOutcome::AlreadyRegistered) => Ok(Json(json!({ "message": ALREADY_REGISTERED })).into_response()),
        Err(RegistrationError::MissingDocument) => Ok(missing_document()),
        Err(e) => Err(e.into()),
    }
}
