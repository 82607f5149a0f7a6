//! User domain types.
//!
//! [`User`] is the stored identity record. It is never serialized to the
//! wire; responses carry [`PublicUser`], which structurally cannot contain
//! the password hash or the security answer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{BirthDate, Email, Phone, Role, UserId};

/// A stored identity record.
///
/// Created only by registration; mutated only by profile update (selected
/// fields) or password reset (`password_hash` only); never deleted here.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned id.
    pub id: UserId,
    /// Display name, 1-100 characters after trimming.
    pub name: String,
    /// Unique, normalized (trimmed lowercase) email.
    pub email: Email,
    /// bcrypt hash of the password. Never the plaintext.
    pub password_hash: String,
    /// E.164-shaped phone number.
    pub phone: Phone,
    /// Free-text address, non-empty after trimming.
    pub address: String,
    /// Date of birth, a real past calendar day.
    pub dob: BirthDate,
    /// Security answer, stored trimmed lowercase for exact-match comparison.
    pub security_answer: String,
    /// Access role, `Customer` unless explicitly promoted.
    pub role: Role,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a user. The store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub phone: Phone,
    pub address: String,
    pub dob: BirthDate,
    pub security_answer: String,
    pub role: Role,
}

/// The sanitized projection of a [`User`] sent in responses.
///
/// Deliberately has no field for the password hash or the security answer,
/// so no response path can leak them.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub address: String,
    pub dob: BirthDate,
    pub role: Role,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            dob: user.dob,
            role: user.role,
        }
    }
}
