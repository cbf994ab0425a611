use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use service::registration::errors::RegistrationError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": title, "detail": detail}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, title: title.to_string(), detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail.into()))
    }

    /// Log the cause and answer 500 without exposing it.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: &self.title, detail: self.detail.as_deref() };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Model(models::errors::ModelError::Validation(m)) => Self::bad_request(m),
            other => Self::internal(other),
        }
    }
}

impl From<RegistrationError> for JsonApiError {
    fn from(e: RegistrationError) -> Self {
        let code = e.code();
        match e {
            RegistrationError::MissingDocument => Self::bad_request(e.to_string()),
            RegistrationError::Validation(m) => Self::bad_request(m),
            RegistrationError::Geocoding(m) => {
                error!(code, error = %m, "geocoding provider unavailable");
                Self::new(StatusCode::BAD_GATEWAY, "Geocoding failed.", None)
            }
            other => {
                error!(code, "registration failed");
                Self::internal(other)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(e: JsonApiError) -> (StatusCode, serde_json::Value) {
        let resp = e.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let (status, body) = body_json(RegistrationError::Repository("password authentication failed for user app".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests_with_detail() {
        let (status, body) = body_json(RegistrationError::Validation("invalid email".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "invalid email");

        let (status, _) = body_json(RegistrationError::Geocoding("timeout".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
