//! Sign-in and admin guards.
//!
//! [`RequireSignIn`] verifies the bearer token and stashes a [`Principal`]
//! in the request extensions. [`RequireAdmin`] picks the principal back up,
//! refetches the user, and gates on the stored role, so a token minted
//! before a demotion stops working at the next admin request.
//!
//! The bearer parser is tolerant: `Bearer <token>`, `bearer <token>`, and a
//! bare `<token>` all authenticate identically.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use orchard_core::UserId;

use crate::models::User;
use crate::state::AppState;

/// The authenticated caller, as proven by the bearer token.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: UserId,
}

/// Extract the token from an `Authorization` header value.
///
/// Strips one optional case-insensitive `Bearer` scheme prefix. Returns
/// `None` for a blank value or a scheme with no token after it.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let value = header.trim();
    if value.is_empty() {
        return None;
    }

    let token = value
        .split_once(char::is_whitespace)
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map_or(value, |(_, rest)| rest.trim_start());

    if token.is_empty() || token.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

/// Rejection for [`RequireSignIn`].
#[derive(Debug)]
pub enum SignInRejection {
    /// The header is absent, blank, or carries no token.
    MissingToken,
    /// The token did not verify.
    InvalidToken,
}

impl IntoResponse for SignInRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Authorization header is invalid",
            Self::InvalidToken => "Unauthorized Access",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

/// Extractor that requires a verified session token.
///
/// On success the [`Principal`] is also inserted into the request
/// extensions for downstream guards.
#[derive(Debug, Clone, Copy)]
pub struct RequireSignIn(pub Principal);

impl FromRequestParts<AppState> for RequireSignIn {
    type Rejection = SignInRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(SignInRejection::MissingToken)?;

        let token = bearer_token(header).ok_or(SignInRejection::MissingToken)?;

        let claims = state.tokens().verify(token).map_err(|err| {
            tracing::debug!(error = %err, "Token verification failed");
            SignInRejection::InvalidToken
        })?;

        let principal = Principal {
            user_id: claims.sub,
        };
        parts.extensions.insert(principal);
        Ok(Self(principal))
    }
}

/// Rejection for [`RequireAdmin`].
#[derive(Debug)]
pub enum AdminRejection {
    /// No principal in the extensions; the sign-in guard did not run.
    NotSignedIn,
    /// The caller exists but is not an admin, or no longer exists at all.
    NotAdmin,
    /// The role lookup failed.
    StoreFailure,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotSignedIn => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Self::NotAdmin => (StatusCode::FORBIDDEN, "Unauthorized Access"),
            Self::StoreFailure => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };
        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

/// Extractor that requires the signed-in caller to be an admin.
///
/// Must run after [`RequireSignIn`]; it reads the [`Principal`] from the
/// extensions rather than re-verifying the token.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or(AdminRejection::NotSignedIn)?;

        let user = state
            .store()
            .find_by_id(principal.user_id)
            .await
            .map_err(|err| {
                let event_id = sentry::capture_error(&err);
                tracing::error!(error = %err, sentry_event_id = %event_id, "Role lookup failed");
                AdminRejection::StoreFailure
            })?
            .ok_or(AdminRejection::NotAdmin)?;

        if !user.role.is_admin() {
            return Err(AdminRejection::NotAdmin);
        }
        Ok(Self(user))
    }
}
