//! API error handling
//!
//! Maps domain and repository errors onto HTTP responses with a JSON
//! error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use wr_core::error::ValidationErrors;
use wr_core::result::ServiceResult;
use wr_db::RepositoryError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, id: String },
    Validation(ValidationErrors),
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Forbidden(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ApiError::NotFound {
                resource: "record",
                id: msg,
            },
            RepositoryError::Conflict(msg) => ApiError::Conflict(msg),
            RepositoryError::Corrupt(msg) => {
                tracing::error!(error = %msg, "corrupt row encountered");
                ApiError::Internal("stored record could not be read".into())
            }
            RepositoryError::Database(e) => {
                tracing::error!(error = %e, "database error");
                ApiError::Internal("database error".into())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// Unwrap a service outcome or surface its validation errors
pub fn service_outcome<T>(result: ServiceResult<T>) -> ApiResult<T> {
    if result.is_success() {
        result
            .result
            .ok_or_else(|| ApiError::internal("service produced no value"))
    } else {
        Err(ApiError::Validation(result.errors))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "errorIdentifier")]
    error_identifier: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::NotFound { resource, id } => ErrorBody {
                error_identifier: "urn:workradar:api:v1:errors:NotFound".into(),
                message: format!("{} with id {} not found", resource, id),
            },
            ApiError::Validation(errors) => ErrorBody {
                error_identifier: "urn:workradar:api:v1:errors:PropertyConstraintViolation".into(),
                message: errors.full_messages().join(", "),
            },
            ApiError::Unauthorized(msg) => ErrorBody {
                error_identifier: "urn:workradar:api:v1:errors:Unauthenticated".into(),
                message: msg.clone(),
            },
            ApiError::Forbidden(msg) => ErrorBody {
                error_identifier: "urn:workradar:api:v1:errors:MissingPermission".into(),
                message: msg.clone(),
            },
            ApiError::BadRequest(msg) => ErrorBody {
                error_identifier: "urn:workradar:api:v1:errors:InvalidRequestBody".into(),
                message: msg.clone(),
            },
            ApiError::Conflict(msg) => ErrorBody {
                error_identifier: "urn:workradar:api:v1:errors:UpdateConflict".into(),
                message: msg.clone(),
            },
            ApiError::Internal(msg) => ErrorBody {
                error_identifier: "urn:workradar:api:v1:errors:InternalError".into(),
                message: msg.clone(),
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_maps_to_404() {
        let err: ApiError = RepositoryError::NotFound("Task with id 9 not found".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let err: ApiError = RepositoryError::Conflict("duplicate".into()).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_service_outcome_surfaces_errors() {
        let failed: ServiceResult<()> = ServiceResult::failure_with_message("nope");
        let err = service_outcome(failed).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
