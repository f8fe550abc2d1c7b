//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Store failures are deliberately loud: a rejected create/read/update/
//! delete surfaces as a 500 instead of silently leaving the view stale.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::identity::IdentityError;
use crate::paystack::PaystackError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Identity provider operation failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Payment verification failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaystackError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Session read/write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Session(_) | Self::Payment(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Identity(err) => match err {
                IdentityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                IdentityError::EmailTaken => StatusCode::CONFLICT,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Payment(err) => match err {
                PaystackError::ChargeNotSuccessful { .. } | PaystackError::ChargeMismatch(_) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Session(_) => {
                "Internal server error".to_owned()
            }
            Self::Identity(err) => match err {
                IdentityError::InvalidCredentials => "Invalid credentials".to_owned(),
                IdentityError::EmailTaken => {
                    "An account with this email already exists".to_owned()
                }
                _ => "Identity provider error".to_owned(),
            },
            Self::Payment(err) => match err {
                PaystackError::ChargeNotSuccessful { .. } => {
                    "Payment was not completed".to_owned()
                }
                PaystackError::ChargeMismatch(msg) => msg.clone(),
                _ => "Payment provider error".to_owned(),
            },
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("prediction 42".to_owned());
        assert_eq!(err.to_string(), "Not found: prediction 42");

        let err = AppError::BadRequest("invalid tier".to_owned());
        assert_eq!(err.to_string(), "Bad request: invalid tier");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("x".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::BadRequest("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_identity_error_status_codes() {
        assert_eq!(
            status_of(AppError::Identity(IdentityError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Identity(IdentityError::EmailTaken)),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_payment_error_status_codes() {
        assert_eq!(
            status_of(AppError::Payment(PaystackError::ChargeNotSuccessful {
                status: "abandoned".to_owned(),
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Payment(PaystackError::ChargeMismatch(
                "amount mismatch".to_owned()
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let response = AppError::Internal("connection pool exhausted".to_owned()).into_response();
        // The body is generic; the detail stays in logs/Sentry.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
