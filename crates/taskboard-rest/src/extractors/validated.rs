//! Validated JSON and query extractors for automatic request validation.
//!
//! This module provides `ValidatedJson<T>` and `ValidatedQuery<T>` extractors
//! that deserialize the request and validate it using the `validator` crate.
//! Schema failures (missing fields, unknown enum values, rule violations) are
//! returned as 422 Unprocessable Entity. Only a body that is not JSON at all
//! is rejected with 400.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use taskboard_core::{collect_field_errors, ErrorResponse};
use validator::{Validate, ValidationErrors};

use crate::responses::ApiResponse;

/// JSON extractor that automatically validates the deserialized value.
///
/// Returns 422 Unprocessable Entity with field-level errors if validation fails.
///
/// ```ignore
/// async fn create_task(ValidatedJson(request): ValidatedJson<CreateTaskRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Query string extractor with the same rejection shape as [`ValidatedJson`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

/// Rejection type for validated query extraction.
#[derive(Debug)]
pub enum ValidatedQueryRejection {
    /// Query string could not be deserialized into the target type.
    QueryError(QueryRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

fn error_response(status: StatusCode, error: ErrorResponse) -> Response {
    (status, Json(ApiResponse::<()>::error(error))).into_response()
}

fn schema_failure(message: String) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        ErrorResponse {
            code: "VALIDATION_ERROR".to_string(),
            message,
            details: None,
            trace_id: None,
        },
    )
}

fn validation_failure(errors: &ValidationErrors) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        ErrorResponse {
            code: "VALIDATION_ERROR".to_string(),
            message: "Request validation failed".to_string(),
            details: Some(collect_field_errors(errors)),
            trace_id: None,
        },
    )
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            // Well-formed JSON that does not fit the request schema.
            Self::JsonError(JsonRejection::JsonDataError(rejection)) => {
                schema_failure(rejection.body_text())
            }
            Self::JsonError(rejection) => error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    code: "INVALID_JSON".to_string(),
                    message: format!("Invalid JSON: {rejection}"),
                    details: None,
                    trace_id: None,
                },
            ),
            Self::ValidationError(errors) => validation_failure(&errors),
        }
    }
}

impl IntoResponse for ValidatedQueryRejection {
    fn into_response(self) -> Response {
        match self {
            Self::QueryError(rejection) => schema_failure(rejection.body_text()),
            Self::ValidationError(errors) => validation_failure(&errors),
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidatedQueryRejection::QueryError)?;

        value
            .validate()
            .map_err(ValidatedQueryRejection::ValidationError)?;

        Ok(Self(value))
    }
}
