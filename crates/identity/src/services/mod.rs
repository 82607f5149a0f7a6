//! Business logic, independent of the HTTP layer.

pub mod auth;

pub use auth::{AuthError, AuthService};
