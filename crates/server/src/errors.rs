use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use service::errors::{FieldViolation, ServiceError};
use thiserror::Error;

/// Client-facing error: a status code plus a `{"detail": ...}` body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub detail: Value,
}

impl JsonApiError {
    pub fn new(status: StatusCode, detail: impl Into<Value>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn unprocessable(violations: &[FieldViolation]) -> Self {
        let detail = violations
            .iter()
            .map(|v| {
                let loc = if v.field.is_empty() { json!(["body"]) } else { json!(["body", v.field]) };
                json!({"loc": loc, "msg": v.message, "type": v.kind})
            })
            .collect::<Vec<_>>();
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, Value::Array(detail))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({"detail": self.detail}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(ref violations) => Self::unprocessable(violations),
            ServiceError::NotFound(_) | ServiceError::EmptyRoster => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            ServiceError::Conflict(_) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}

// Malformed JSON, wrong content type and similar all surface as 422.
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::unprocessable(&[FieldViolation::new("", rejection.body_text(), "json_invalid")])
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
