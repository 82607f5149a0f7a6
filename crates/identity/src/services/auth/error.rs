//! Auth service errors.
//!
//! The `Display` strings are the client-facing messages; the HTTP layer maps
//! each variant to a status and serializes the message as-is. Credential and
//! reset failures collapse to one message per flow so a caller probing the
//! API cannot tell which part of the check failed.

use thiserror::Error;

use orchard_core::BirthDateError;

use crate::db::StoreError;
use crate::token::TokenError;

/// Errors returned by the auth service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was absent or blank.
    #[error("{0} is Required")]
    MissingField(&'static str),

    /// Email failed the structural check.
    #[error("Invalid Email Format")]
    InvalidEmail,

    /// Phone failed the E.164 shape check.
    #[error("Invalid Phone Number")]
    InvalidPhone,

    /// Password shorter than the minimum length.
    #[error("Password must be at least 6 characters long")]
    WeakPassword,

    /// Name empty or over the length cap after trimming.
    #[error("Name must be between 1 and 100 characters")]
    InvalidName,

    /// Date of birth failed format, calendar, or past-date checks.
    #[error(transparent)]
    InvalidDob(#[from] BirthDateError),

    /// The email is already registered. Reported as a success-shaped
    /// response, not an error status.
    #[error("Already registered, please login")]
    AlreadyRegistered,

    /// Login failed. One message for unknown email and wrong password.
    #[error("Invalid Email or Password")]
    InvalidCredentials,

    /// Password reset failed. One message for unknown email and wrong answer.
    #[error("Invalid Email or Answer")]
    InvalidReset,

    /// A profile field was an explicit JSON null.
    #[error("Invalid input. {0} cannot be null.")]
    NullField(&'static str),

    /// A profile field was present but blank after trimming.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// A profile update payload with no recognized fields.
    #[error("Request body is empty")]
    EmptyBody,

    /// The authenticated user no longer exists in the store.
    #[error("User not found")]
    UserNotFound,

    /// Password hashing or verification failed internally.
    #[error("password hashing failed")]
    Hashing(#[source] bcrypt::BcryptError),

    /// Token signing failed internally.
    #[error("token signing failed")]
    Token(#[source] TokenError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_facing_messages() {
        assert_eq!(
            AuthError::MissingField("Name").to_string(),
            "Name is Required"
        );
        assert_eq!(
            AuthError::MissingField("New Password").to_string(),
            "New Password is Required"
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid Email or Password"
        );
        assert_eq!(
            AuthError::InvalidReset.to_string(),
            "Invalid Email or Answer"
        );
        assert_eq!(
            AuthError::AlreadyRegistered.to_string(),
            "Already registered, please login"
        );
        assert_eq!(
            AuthError::NullField("DOB").to_string(),
            "Invalid input. DOB cannot be null."
        );
        assert_eq!(
            AuthError::EmptyField("Phone").to_string(),
            "Phone cannot be empty"
        );
        assert_eq!(AuthError::EmptyBody.to_string(), "Request body is empty");
    }
}
