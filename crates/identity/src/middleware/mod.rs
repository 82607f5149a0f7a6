//! Request guards for protected routes.

mod auth;

pub use auth::{Principal, RequireAdmin, RequireSignIn, bearer_token};
