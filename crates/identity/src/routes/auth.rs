//! Auth route handlers.
//!
//! Handlers are thin: extract, call the service, shape the response body.
//! Success bodies are `{"success": true, ...}`; every failure path goes
//! through [`crate::error::AppError`] or a guard rejection so the body
//! shape stays uniform.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router, extract::State};
use serde_json::json;

use crate::error::Result;
use crate::middleware::{RequireAdmin, RequireSignIn};
use crate::models::PublicUser;
use crate::services::auth::{LoginInput, ProfileUpdate, RegisterInput, ResetInput};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/profile", put(update_profile))
        .route("/user-auth", get(user_auth))
        .route("/admin-auth", get(admin_auth))
}

/// `POST /api/v1/auth/register`
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse> {
    let user = state.auth().register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "user": PublicUser::from(&user),
        })),
    ))
}

/// `POST /api/v1/auth/login`
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    let (user, token) = state.auth().login(input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Login Successful",
        "user": PublicUser::from(&user),
        "token": token,
    })))
}

/// `POST /api/v1/auth/forgot-password`
async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ResetInput>,
) -> Result<impl IntoResponse> {
    state.auth().forgot_password(input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Password Reset Successfully",
    })))
}

/// `PUT /api/v1/auth/profile`
async fn update_profile(
    RequireSignIn(principal): RequireSignIn,
    State(state): State<AppState>,
    Json(patch): Json<ProfileUpdate>,
) -> Result<impl IntoResponse> {
    let user = state.auth().update_profile(principal.user_id, patch).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "updated_user": PublicUser::from(&user),
    })))
}

/// `GET /api/v1/auth/user-auth`
///
/// Probe endpoint: succeeds for any valid session token.
#[allow(clippy::unused_async)]
async fn user_auth(_: RequireSignIn) -> Result<impl IntoResponse> {
    Ok(Json(json!({ "success": true })))
}

/// `GET /api/v1/auth/admin-auth`
///
/// Probe endpoint: succeeds only for a signed-in admin. The guards run in
/// declaration order; the sign-in guard seeds the principal the admin
/// guard reads.
#[allow(clippy::unused_async)]
async fn admin_auth(_: RequireSignIn, RequireAdmin(_): RequireAdmin) -> Result<impl IntoResponse> {
    Ok(Json(json!({ "success": true })))
}
