//! HTTP route definitions.

mod auth;

use axum::Router;

use crate::state::AppState;

/// All API routes, nested under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/v1/auth", auth::routes())
}
