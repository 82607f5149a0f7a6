//! Persistence layer for identity records.
//!
//! The service talks to a [`UserStore`] trait object: a unique-email lookup,
//! a find-by-id, and an update-by-id over [`User`] records. Production uses
//! [`PgUserStore`]; tests and local development use [`MemoryUserStore`].
//!
//! The duplicate-email guard in registration is check-then-insert and not
//! atomic with the insert; under concurrency the store's own unique index is
//! the only real enforcement, surfaced as [`StoreError::Conflict`].

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use orchard_core::{Email, UserId};

use crate::models::{NewUser, User};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint was violated (duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The record to update does not exist.
    #[error("record not found")]
    NotFound,

    /// Stored data could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Persistence operations over identity records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by normalized email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Look up a user matching both normalized email and normalized security
    /// answer in a single conjunctive query.
    ///
    /// Callers cannot learn which of the two did not match.
    async fn find_by_email_and_answer(
        &self,
        email: &Email,
        answer: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Insert a new user. The store assigns id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the email is already taken.
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Replace the stored record with the given one, keyed by its id.
    ///
    /// Returns the persisted record with a fresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id.
    async fn update(&self, user: &User) -> Result<User, StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
