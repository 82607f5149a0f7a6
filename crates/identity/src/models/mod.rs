//! Domain models for the identity service.

mod patch;
mod user;

pub use patch::Patch;
pub use user::{NewUser, PublicUser, User};
