//! Application error type and its HTTP rendering.
//!
//! Every failure raised by the request pipeline, the services or the
//! repositories ends up as an [`AppError`]. Handlers return
//! `Result<_, AppError>` and axum turns the error into a response through
//! [`IntoResponse`], which makes this type the single place where failures
//! are mapped to a status code and a JSON body.
//!
//! # Response Body
//!
//! ```json
//! {
//!   "status": false,
//!   "kind": "validation_error",
//!   "error": "title must be between 5 and 2550 characters",
//!   "fields": { "title": ["title must be between 5 and 2550 characters"] }
//! }
//! ```
//!
//! `fields` is omitted when no field-level detail is attached.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Machine-readable classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthenticationError,
    ValidationError,
    PersistenceError,
    InternalInconsistency,
    InternalError,
    NotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AuthenticationError => "authentication_error",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::PersistenceError => "persistence_error",
            ErrorKind::InternalInconsistency => "internal_inconsistency",
            ErrorKind::InternalError => "internal_error",
            ErrorKind::NotFound => "not_found",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::AuthenticationError => StatusCode::UNAUTHORIZED,
            ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::PersistenceError
            | ErrorKind::InternalInconsistency
            | ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub error: Error,
    pub fields: FieldErrors,
}

/// JSON shape of an error response, used for the OpenAPI schema.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: bool,
    pub kind: ErrorKind,
    pub error: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: FieldErrors,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            status: kind.status(),
            error: err.into(),
            fields: FieldErrors::new(),
        }
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::AuthenticationError, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::ValidationError, err)
    }

    /// Validation failure attributed to a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut error = Self::bad_request(anyhow::anyhow!("{}", message));
        error.fields.insert(field.to_string(), vec![message]);
        error
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::PersistenceError, err)
    }

    pub fn inconsistency<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InternalInconsistency, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InternalError, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    /// Merges field errors from another validation error into this one.
    pub fn with_fields(mut self, fields: FieldErrors) -> Self {
        for (field, messages) in fields {
            self.fields.entry(field).or_default().extend(messages);
        }
        self
    }

    /// Message sent to the client. Server-side causes stay in the logs.
    fn public_message(&self) -> String {
        match self.kind {
            ErrorKind::PersistenceError => "A database error occurred".to_string(),
            ErrorKind::InternalError => "Internal server error".to_string(),
            _ => self.error.to_string(),
        }
    }

    /// Validation error carrying every collected field message.
    pub fn from_fields(fields: FieldErrors) -> Self {
        let message = fields
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");

        AppError::bad_request(anyhow::anyhow!("{}", message)).with_fields(fields)
    }

    /// Converts `validator` output into a validation error with field detail.
    pub fn validation(errors: ValidationErrors) -> Self {
        Self::from_fields(field_errors(&errors))
    }
}

/// Flattens `validator` errors into field name → messages.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(kind = %self.kind, error = ?self.error, "Request failed");
        }

        let body = Json(ErrorResponse {
            status: false,
            kind: self.kind,
            error: self.public_message(),
            fields: self.fields,
        });

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
