//! In-memory user store for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use orchard_core::{Email, UserId};

use super::{StoreError, UserStore};
use crate::models::{NewUser, User};

/// User store held in process memory.
///
/// Mirrors the `PostgreSQL` store's semantics, including the unique-email
/// conflict on insert, so the service behaves identically over either
/// backend.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email_and_answer(
        &self,
        email: &Email,
        answer: &str,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| &u.email == email && u.security_answer == answer)
            .cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            phone: new_user.phone,
            address: new_user.address,
            dob: new_user.dob,
            security_answer: new_user.security_answer,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }

        let mut updated = user.clone();
        updated.updated_at = Utc::now();
        users.insert(updated.id, updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use orchard_core::{BirthDate, Phone, Role};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Jo".to_owned(),
            email: Email::parse(email).unwrap(),
            password_hash: "hash".to_owned(),
            phone: Phone::parse("+6591234567").unwrap(),
            address: "1 Road".to_owned(),
            dob: BirthDate::parse_at(
                "1999-05-02",
                NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            )
            .unwrap(),
            security_answer: "blue".to_owned(),
            role: Role::Customer,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("jo@ex.com")).await.unwrap();

        let by_email = store
            .find_by_email(&Email::parse("jo@ex.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, user.email);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStore::new();
        store.insert(new_user("jo@ex.com")).await.unwrap();

        let err = store.insert(new_user("jo@ex.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_email_and_answer_is_conjunctive() {
        let store = MemoryUserStore::new();
        store.insert(new_user("jo@ex.com")).await.unwrap();
        let email = Email::parse("jo@ex.com").unwrap();

        assert!(store
            .find_by_email_and_answer(&email, "blue")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_email_and_answer(&email, "red")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("jo@ex.com")).await.unwrap();

        let mut detached = user.clone();
        detached.id = UserId::generate();
        let err = store.update(&detached).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
