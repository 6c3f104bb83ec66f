//! Centralized API error handling
//!
//! Unified error type for API responses with HTTP status code mapping and
//! JSON error bodies. Billing rejections (paid-off loans, duplicate payment
//! weeks) are first-class variants so handlers surface them without
//! re-mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Loan is already fully paid")]
    AlreadyPaidOff,

    #[error("Payment already exists for current week (week {0})")]
    DuplicatePayment(i32),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in the response
#[derive(Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Get the error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::AlreadyPaidOff => "LOAN_PAID_OFF",
            ApiError::DuplicatePayment(_) => "DUPLICATE_PAYMENT",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::AlreadyPaidOff => StatusCode::CONFLICT,
            ApiError::DuplicatePayment(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        // Log server errors
        match &self {
            ApiError::DatabaseError(_) => {
                tracing::error!(error = %message, code = %error_code, "Server error occurred");
            }
            _ => {
                tracing::debug!(error = %message, code = %error_code, "Client error occurred");
            }
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code: error_code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

// Convenience conversions from common error types

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::DatabaseError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(ApiError::AlreadyPaidOff.error_code(), "LOAN_PAID_OFF");
        assert_eq!(ApiError::DuplicatePayment(4).error_code(), "DUPLICATE_PAYMENT");
        assert_eq!(
            ApiError::ValidationError("test".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::AlreadyPaidOff.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::DuplicatePayment(4).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::ValidationError("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::DatabaseError("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_payment_message_names_the_week() {
        let err = ApiError::DuplicatePayment(7);
        assert!(err.to_string().contains("week 7"));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
