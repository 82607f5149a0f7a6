//! `PostgreSQL`-backed user store.
//!
//! Queries are bound at runtime (no compile-time verification) so the crate
//! builds without a live database. The `identity.user` table carries a
//! unique index on `email`; that index is the real duplicate-email
//! enforcement under concurrent registration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use orchard_core::{BirthDate, Email, Phone, Role, UserId};

use super::{StoreError, UserStore};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, phone, address, dob, \
                            security_answer, role, created_at, updated_at";

/// User store backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of `identity.user`.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: Email,
    password_hash: String,
    phone: Phone,
    address: String,
    dob: BirthDate,
    security_answer: String,
    role: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            phone: row.phone,
            address: row.address,
            dob: row.dob,
            security_answer: row.security_answer,
            role: Role::from_code(i64::from(row.role)),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM identity.user WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM identity.user WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email_and_answer(
        &self,
        email: &Email,
        answer: &str,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM identity.user \
             WHERE email = $1 AND security_answer = $2"
        ))
        .bind(email)
        .bind(answer)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO identity.user \
             (id, name, email, password_hash, phone, address, dob, security_answer, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(UserId::generate())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.phone)
        .bind(&new_user.address)
        .bind(new_user.dob)
        .bind(&new_user.security_answer)
        .bind(i32::try_from(new_user.role.code()).unwrap_or(0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::Conflict("email already exists".to_owned());
            }
            StoreError::Database(e)
        })?;

        Ok(User::from(row))
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE identity.user \
             SET name = $2, email = $3, password_hash = $4, phone = $5, address = $6, \
                 dob = $7, security_answer = $8, role = $9, updated_at = now() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.dob)
        .bind(&user.security_answer)
        .bind(i32::try_from(user.role.code()).unwrap_or(0))
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from).ok_or(StoreError::NotFound)
    }
}
