//! API error handling.
//!
//! Every failure is reported as a flat `{"error": "<text>"}` body. The
//! [`ErrorKind`] decides the status code; parse failures additionally carry
//! the raw model reply under `raw_response`.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::completion::CompletionError;
use crate::db::{ObjectId, ObjectIdError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required body or query field is absent
    MissingField,
    /// The request could not be read or is missing parameters
    BadRequest,
    /// An identifier is not a valid ObjectId
    BadId,
    /// Email already registered
    Duplicate,
    /// No user matches the given credentials
    InvalidLogin,
    /// The document store rejected an operation
    Store,
    /// An update or delete touched no document
    NotFound,
    /// The completion service failed or answered with a non-200 status
    Upstream,
    /// The completion reply held no usable suggestions
    ParseFailure,
    /// Any other failure while serving a suggestion
    Internal,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::MissingField
            | ErrorKind::BadRequest
            | ErrorKind::BadId
            | ErrorKind::Duplicate
            | ErrorKind::InvalidLogin
            | ErrorKind::Store => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Upstream | ErrorKind::ParseFailure | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Kinds whose message gets the route's "Failed to ..." prefix
    fn takes_context(&self) -> bool {
        matches!(
            self,
            ErrorKind::MissingField | ErrorKind::BadRequest | ErrorKind::BadId | ErrorKind::Store
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    raw_response: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raw_response: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(ErrorKind::MissingField, format!("missing field `{}`", field))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Duplicate, message)
    }

    pub fn invalid_login(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidLogin, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Unusable completion reply, returned with the raw text for diagnosis
    pub fn parse_failure(message: impl Into<String>, raw_response: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ParseFailure,
            message: message.into(),
            raw_response: Some(raw_response.into()),
        }
    }

    /// Prefix the message with the failing route's context, e.g.
    /// `Failed to add new task: missing field `name``.
    pub fn context(mut self, context: &str) -> Self {
        if self.kind.takes_context() {
            self.message = format!("{}: {}", context, self.message);
        }
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        if status.is_server_error() {
            tracing::error!(kind = ?self.kind, "{}", self.message);
        } else {
            tracing::warn!(kind = ?self.kind, "{}", self.message);
        }

        let body = ErrorResponse {
            error: self.message,
            raw_response: self.raw_response,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

// -------------------------------------------------------------------------
// Conversion implementations for common error types
// -------------------------------------------------------------------------

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);
        ApiError::new(ErrorKind::Store, err.to_string())
    }
}

impl From<ObjectIdError> for ApiError {
    fn from(err: ObjectIdError) -> Self {
        ApiError::new(ErrorKind::BadId, err.to_string())
    }
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::MalformedResponse(_) => ApiError::internal(err.to_string()),
            _ => ApiError::new(ErrorKind::Upstream, err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::bad_request(err.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::bad_request(err.body_text())
    }
}

/// Attach a route's failure context while converting into [`ApiError`].
pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn context(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|e| {
            let err: ApiError = e.into();
            err.context(context)
        })
    }
}

/// Unwrap a required field or fail with a missing-field error.
pub fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}

/// Parse a required identifier field.
pub fn require_id(value: Option<String>, field: &str) -> Result<ObjectId, ApiError> {
    let raw = require(value, field)?;
    Ok(ObjectId::parse_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(ErrorKind::MissingField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::BadId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Duplicate.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::InvalidLogin.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Store.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::Upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorKind::ParseFailure.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorKind::Internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_context_prefixes_request_errors_only() {
        let err = ApiError::missing_field("name").context("Failed to add new task");
        assert_eq!(err.message(), "Failed to add new task: missing field `name`");

        let err = ApiError::not_found("Task not found").context("Failed to update task");
        assert_eq!(err.message(), "Task not found");

        let err = ApiError::duplicate("Email already existed").context("Failed to add new user");
        assert_eq!(err.message(), "Email already existed");
    }

    #[test]
    fn test_bad_id_conversion() {
        let err: ApiError = crate::db::ObjectId::parse_str("xyz").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::BadId);
        assert!(err.message().contains("'xyz' is not a valid ObjectId"));
    }

    #[test]
    fn test_upstream_conversion_keeps_status_and_body() {
        let err: ApiError = CompletionError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.message(), "API request failed: 401 - unauthorized");

        let err: ApiError = CompletionError::MalformedResponse("no choices returned".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.kind().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_require() {
        assert_eq!(require(Some("x".to_string()), "name").unwrap(), "x");
        let err = require(None, "email").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.message(), "missing field `email`");
    }
}
