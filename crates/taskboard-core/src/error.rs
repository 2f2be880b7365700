//! Caller-facing error types shared by the service and transport layers.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Service-level error returned to the transport layer.
///
/// Repository error kinds never cross the service boundary; each service
/// operation narrows them into one of these categories. The transport layer
/// only has to look at [`TaskboardError::status_code`].
#[derive(Error, Debug)]
pub enum TaskboardError {
    /// The requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request was well-formed but conflicts with stored data
    /// (duplicate email, dangling reference).
    #[error("{0}")]
    InvalidInput(String),

    /// Request schema validation failed before any storage call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unexpected storage failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskboardError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::Validation(_) => 422,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found<T: Into<String>>(message: T) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a database error.
    #[must_use]
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error was caused by the client rather than the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::InvalidInput(_) | Self::Validation(_)
        )
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `TaskboardError`.
    #[must_use]
    pub fn from_error(error: &TaskboardError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&TaskboardError> for ErrorResponse {
    fn from(error: &TaskboardError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(TaskboardError::not_found("Task not found.").status_code(), 404);
        assert_eq!(TaskboardError::invalid_input("Wrong data provided.").status_code(), 400);
        assert_eq!(TaskboardError::validation("title: length").status_code(), 422);
        assert_eq!(TaskboardError::database("connection reset").status_code(), 500);
        assert_eq!(TaskboardError::internal("oops").status_code(), 500);
        assert_eq!(
            TaskboardError::Configuration("missing url".to_string()).status_code(),
            500
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TaskboardError::not_found("x").error_code(), "NOT_FOUND");
        assert_eq!(TaskboardError::invalid_input("x").error_code(), "INVALID_INPUT");
        assert_eq!(TaskboardError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(TaskboardError::database("x").error_code(), "DATABASE_ERROR");
        assert_eq!(TaskboardError::internal("x").error_code(), "INTERNAL_ERROR");
        assert_eq!(
            TaskboardError::Other(anyhow::anyhow!("boom")).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_client_errors_are_distinguishable() {
        let not_found = TaskboardError::not_found("Task not found.");
        let invalid = TaskboardError::invalid_input("Wrong data provided.");
        let validation = TaskboardError::validation("title: too short");

        assert!(not_found.is_client_error());
        assert!(invalid.is_client_error());
        assert!(validation.is_client_error());
        assert!(!TaskboardError::database("down").is_client_error());

        assert_ne!(not_found.status_code(), invalid.status_code());
        assert_ne!(invalid.status_code(), validation.status_code());
    }

    #[test]
    fn test_user_facing_messages_are_verbatim() {
        assert_eq!(
            TaskboardError::not_found("Task not found.").to_string(),
            "Task not found."
        );
        assert_eq!(
            TaskboardError::invalid_input("Wrong data provided.").to_string(),
            "Wrong data provided."
        );
    }

    #[test]
    fn test_error_response_from_error() {
        let err = TaskboardError::not_found("Task not found.");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Task not found.");
        assert!(response.details.is_none());
        assert!(response.trace_id.is_none());
    }

    #[test]
    fn test_error_response_with_trace_id() {
        let err = TaskboardError::not_found("Task not found.");
        let response = ErrorResponse::from_error(&err).with_trace_id("trace-123");
        assert_eq!(response.trace_id, Some("trace-123".to_string()));
    }

    #[test]
    fn test_error_response_with_details() {
        let err = TaskboardError::validation("bad input");
        let details = vec![FieldError {
            field: "email".to_string(),
            message: "Invalid email".to_string(),
            code: "email".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }

    #[test]
    fn test_error_response_skips_empty_fields() {
        let err = TaskboardError::invalid_input("Wrong data provided.");
        let json = serde_json::to_value(ErrorResponse::from_error(&err)).unwrap();
        assert!(json.get("details").is_none());
        assert!(json.get("trace_id").is_none());
    }
}
