//! Error types shared by the service and HTTP layers.
//!
//! [`UrlError`] is the single typed outcome of every url operation.
//! [`AppError`] is its HTTP rendering; the only conversion between them is
//! `impl From<UrlError> for AppError`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }
}

/// Flattens `validator` output into violations sorted by field, then rule.
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| FieldViolation::new(field.to_string(), e.code.to_string()))
        })
        .collect();

    violations.sort_by(|a, b| (&a.field, &a.rule).cmp(&(&b.field, &b.rule)));
    violations
}

/// Outcome of a failed create, update or resolve.
///
/// Create yields `Validation`, `Conflict` or `Internal`; update may also
/// yield `NotFound`; resolve yields only `NotFound` or `Internal`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("alias already exists: {0}")]
    Conflict(String),

    #[error("url not found")]
    NotFound,

    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for UrlError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(field_violations(&errors))
    }
}

impl From<StoreError> for UrlError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AliasExists(alias) => Self::Conflict(alias),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serialized error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// HTTP-facing error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String, details: Value },
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Status code and machine-readable code for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest { .. } => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn into_error_info(self) -> ErrorInfo {
        let (_, code) = self.status();
        let (message, details) = match self {
            AppError::BadRequest { message, details }
            | AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

/// Name of a domain field as it appears in request bodies.
fn request_field(field: &str) -> &str {
    match field {
        "target_url" => "url",
        other => other,
    }
}

impl From<UrlError> for AppError {
    fn from(e: UrlError) -> Self {
        match e {
            UrlError::Validation(violations) => {
                let violations: Vec<FieldViolation> = violations
                    .into_iter()
                    .map(|v| FieldViolation::new(request_field(&v.field), v.rule))
                    .collect();

                AppError::validation(
                    "Request validation failed",
                    json!({ "violations": violations }),
                )
            }
            UrlError::Conflict(alias) => {
                AppError::conflict("Alias already exists", json!({ "alias": alias }))
            }
            UrlError::NotFound => AppError::not_found("Url not found", json!({})),
            UrlError::Internal(reason) => {
                tracing::error!(%reason, "Internal failure");
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Failed to decode request",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status();
        let body = ErrorBody {
            error: self.into_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
