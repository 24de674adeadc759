use serde::Serialize;
use thiserror::Error;

/// One rejected input field, reported back to the client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    pub kind: &'static str,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: &'static str) -> Self {
        Self { field: field.into(), message: message.into(), kind }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, "Field required", "missing")
    }

    pub fn not_an_integer(field: &str) -> Self {
        Self::new(field, "Input should be a valid integer", "int_type")
    }

    pub fn int_parsing(field: &str) -> Self {
        Self::new(field, "Input should be a valid integer, unable to parse string as an integer", "int_parsing")
    }

    pub fn int_from_float(field: &str) -> Self {
        Self::new(field, "Input should be a valid integer, got a number with a fractional part", "int_from_float")
    }

    pub fn int_too_large(field: &str) -> Self {
        Self::new(field, "Unable to parse input string as an integer, exceeded maximum size", "int_parsing_size")
    }

    pub fn not_a_string(field: &str) -> Self {
        Self::new(field, "Input should be a valid string", "string_type")
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),
    #[error("학생 '{0}'을(를) 찾을 수 없습니다.")]
    NotFound(String),
    #[error("점수 데이터가 없습니다.")]
    EmptyRoster,
    #[error("학생 '{0}'은(는) 이미 존재합니다.")]
    Conflict(String),
}

impl ServiceError {
    pub fn not_found(name: &str) -> Self { Self::NotFound(name.to_string()) }

    pub fn conflict(name: &str) -> Self { Self::Conflict(name.to_string()) }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::NotFound(_) | ServiceError::EmptyRoster => "not_found",
            ServiceError::Conflict(_) => "conflict",
        }
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}
