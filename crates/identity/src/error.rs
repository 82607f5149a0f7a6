//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server faults to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`. Guard rejections (401/403) respond through their
//! own `IntoResponse` impls in the middleware module.
//!
//! Every error body has the same shape as success bodies minus the data:
//! `{"success": false, "message": "..."}`. One deliberate oddity: a
//! duplicate registration responds `200 OK` with `success: false`, so
//! clients branch on `success`, not on the status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::services::auth::AuthError;

/// Application-level error type for the identity service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Auth service operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Store operation failed outside the auth service.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    const fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Store(_)
                | Self::Auth(AuthError::Hashing(_) | AuthError::Token(_) | AuthError::Store(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server faults to Sentry; client mistakes are not events
        if self.is_server_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Auth(err) => match err {
                AuthError::AlreadyRegistered => StatusCode::OK,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::Hashing(_) | AuthError::Token(_) | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_owned()
        } else {
            match &self {
                Self::Auth(err) => err.to_string(),
                Self::Store(_) => "Internal server error".to_owned(),
            }
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::MissingField("Name"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Store(StoreError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::Store(StoreError::NotFound))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_registration_is_200_with_success_false() {
        let response = AppError::Auth(AuthError::AlreadyRegistered).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_server_faults_do_not_leak_details() {
        let err = AppError::Store(StoreError::DataCorruption(
            "connection refused at 10.0.0.5".to_owned(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
