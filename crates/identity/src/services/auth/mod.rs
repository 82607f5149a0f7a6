//! Registration, login, password reset, and profile updates.
//!
//! All validation runs here, in a fixed order per operation, so the HTTP
//! layer only shapes responses. Inputs arrive as optional strings and are
//! trimmed before checks, except passwords, which are hashed exactly as
//! submitted.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use serde::Deserialize;

use orchard_core::{BirthDate, Email, Phone, Role, UserId, validate};

use crate::db::{StoreError, UserStore};
use crate::models::{NewUser, Patch, User};
use crate::token::TokenIssuer;

/// bcrypt work factor for password hashes.
pub const BCRYPT_COST: u32 = 10;

/// Registration payload. Every field is checked before any store access.
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dob: Option<String>,
    pub answer: Option<String>,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Password reset payload.
#[derive(Debug, Deserialize)]
pub struct ResetInput {
    pub email: Option<String>,
    pub answer: Option<String>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

/// Partial profile update payload.
///
/// Each field is tri-state: absent keeps the stored value, explicit null is
/// rejected, and a value is validated like its registration counterpart.
/// An `email` key is accepted but never applied; email is immutable after
/// registration.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub password: Patch<String>,
    #[serde(default)]
    pub phone: Patch<String>,
    #[serde(default)]
    pub address: Patch<String>,
    #[serde(default)]
    pub dob: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
}

impl ProfileUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_missing()
            && self.password.is_missing()
            && self.phone.is_missing()
            && self.address.is_missing()
            && self.dob.is_missing()
            && self.email.is_missing()
    }
}

/// Identity operations over a [`UserStore`] and a [`TokenIssuer`].
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    /// Register a new user.
    ///
    /// Checks run in order: required fields (name, email, password, phone,
    /// address, dob, answer), then formats, then the duplicate-email lookup.
    /// The first failure wins.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AlreadyRegistered`] for a taken email, and a
    /// validation variant for each failed check.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AuthError> {
        if validate::is_blank(input.name.as_deref()) {
            return Err(AuthError::MissingField("Name"));
        }
        if validate::is_blank(input.email.as_deref()) {
            return Err(AuthError::MissingField("Email"));
        }
        // Passwords are never trimmed, so the required check is on the raw
        // bytes. " " is an accepted (if bad) password character.
        if input.password.as_deref().is_none_or(str::is_empty) {
            return Err(AuthError::MissingField("Password"));
        }
        if validate::is_blank(input.phone.as_deref()) {
            return Err(AuthError::MissingField("Phone"));
        }
        if validate::is_blank(input.address.as_deref()) {
            return Err(AuthError::MissingField("Address"));
        }
        if validate::is_blank(input.dob.as_deref()) {
            return Err(AuthError::MissingField("DOB"));
        }
        if validate::is_blank(input.answer.as_deref()) {
            return Err(AuthError::MissingField("Answer"));
        }

        let name = input.name.unwrap_or_default().trim().to_owned();
        let password = input.password.unwrap_or_default();
        let address = input.address.unwrap_or_default().trim().to_owned();
        let answer = input
            .answer
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        let email = Email::parse(&input.email.unwrap_or_default())
            .map_err(|_| AuthError::InvalidEmail)?;
        let phone = Phone::parse(&input.phone.unwrap_or_default())
            .map_err(|_| AuthError::InvalidPhone)?;

        if !validate::password_min_length(&password) {
            return Err(AuthError::WeakPassword);
        }
        if !validate::name_length(&name) {
            return Err(AuthError::InvalidName);
        }

        let dob = BirthDate::parse(input.dob.unwrap_or_default().trim())?;

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AuthError::AlreadyRegistered);
        }

        let password_hash = bcrypt::hash(&password, BCRYPT_COST).map_err(AuthError::Hashing)?;

        let new_user = NewUser {
            name,
            email,
            password_hash,
            phone,
            address,
            dob,
            security_answer: answer,
            role: Role::Customer,
        };

        match self.store.insert(new_user).await {
            Ok(user) => Ok(user),
            // Lost a race with a concurrent registration of the same email.
            Err(StoreError::Conflict(_)) => Err(AuthError::AlreadyRegistered),
            Err(e) => Err(e.into()),
        }
    }

    /// Authenticate a user and issue a session token.
    ///
    /// Every failure, from a blank field to a wrong password, surfaces as
    /// the same [`AuthError::InvalidCredentials`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any authentication
    /// failure; internal variants for store, hashing, or signing faults.
    pub async fn login(&self, input: LoginInput) -> Result<(User, String), AuthError> {
        if validate::is_blank(input.email.as_deref()) {
            return Err(AuthError::InvalidCredentials);
        }
        let Some(password) = input.password.filter(|p| !p.is_empty()) else {
            return Err(AuthError::InvalidCredentials);
        };

        let email = Email::parse(&input.email.unwrap_or_default())
            .map_err(|_| AuthError::InvalidCredentials)?;

        let Some(user) = self.store.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let matches =
            bcrypt::verify(&password, &user.password_hash).map_err(AuthError::Hashing)?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.sign(user.id).map_err(AuthError::Token)?;
        Ok((user, token))
    }

    /// Reset a password given the account's email and security answer.
    ///
    /// The email-and-answer lookup is a single conjunctive query; an
    /// unknown email and a wrong answer are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidReset`] when the pair does not match,
    /// and validation variants for the individual field checks.
    pub async fn forgot_password(&self, input: ResetInput) -> Result<(), AuthError> {
        if validate::is_blank(input.email.as_deref()) {
            return Err(AuthError::MissingField("Email"));
        }
        if validate::is_blank(input.answer.as_deref()) {
            return Err(AuthError::MissingField("Answer"));
        }
        if input.new_password.as_deref().is_none_or(str::is_empty) {
            return Err(AuthError::MissingField("New Password"));
        }

        let email = Email::parse(&input.email.unwrap_or_default())
            .map_err(|_| AuthError::InvalidEmail)?;
        let answer = input
            .answer
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let new_password = input.new_password.unwrap_or_default();

        if !validate::password_min_length(&new_password) {
            return Err(AuthError::WeakPassword);
        }

        let Some(mut user) = self
            .store
            .find_by_email_and_answer(&email, &answer)
            .await?
        else {
            return Err(AuthError::InvalidReset);
        };

        user.password_hash =
            bcrypt::hash(&new_password, BCRYPT_COST).map_err(AuthError::Hashing)?;
        self.store.update(&user).await?;
        Ok(())
    }

    /// Apply a partial profile update to the given user.
    ///
    /// Fields are processed in order: name, password, phone, address, dob.
    /// The payload's `email` key, if any, is ignored. Nothing is persisted
    /// unless every present field validates.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptyBody`] for a payload with no recognized
    /// keys, [`AuthError::UserNotFound`] if the user no longer exists, and
    /// validation variants per field.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        patch: ProfileUpdate,
    ) -> Result<User, AuthError> {
        if patch.is_empty() {
            return Err(AuthError::EmptyBody);
        }

        let Some(mut user) = self.store.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotFound);
        };

        match patch.name {
            Patch::Missing => {}
            Patch::Null => return Err(AuthError::NullField("Name")),
            Patch::Value(name) => {
                let name = name.trim().to_owned();
                if name.is_empty() {
                    return Err(AuthError::EmptyField("Name"));
                }
                if !validate::name_length(&name) {
                    return Err(AuthError::InvalidName);
                }
                user.name = name;
            }
        }

        match patch.password {
            Patch::Missing => {}
            Patch::Null => return Err(AuthError::NullField("Password")),
            Patch::Value(password) => {
                if password.is_empty() {
                    return Err(AuthError::EmptyField("Password"));
                }
                if !validate::password_min_length(&password) {
                    return Err(AuthError::WeakPassword);
                }
                user.password_hash =
                    bcrypt::hash(&password, BCRYPT_COST).map_err(AuthError::Hashing)?;
            }
        }

        match patch.phone {
            Patch::Missing => {}
            Patch::Null => return Err(AuthError::NullField("Phone")),
            Patch::Value(phone) => {
                let phone = phone.trim().to_owned();
                if phone.is_empty() {
                    return Err(AuthError::EmptyField("Phone"));
                }
                user.phone = Phone::parse(&phone).map_err(|_| AuthError::InvalidPhone)?;
            }
        }

        match patch.address {
            Patch::Missing => {}
            Patch::Null => return Err(AuthError::NullField("Address")),
            Patch::Value(address) => {
                let address = address.trim().to_owned();
                if address.is_empty() {
                    return Err(AuthError::EmptyField("Address"));
                }
                user.address = address;
            }
        }

        match patch.dob {
            Patch::Missing => {}
            Patch::Null => return Err(AuthError::NullField("DOB")),
            Patch::Value(dob) => {
                let dob = dob.trim().to_owned();
                if dob.is_empty() {
                    return Err(AuthError::EmptyField("DOB"));
                }
                user.dob = BirthDate::parse(&dob)?;
            }
        }

        Ok(self.store.update(&user).await?)
    }
}
