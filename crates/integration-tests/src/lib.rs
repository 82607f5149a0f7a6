//! Integration tests for the identity service.
//!
//! Tests assemble the real router in-process over an in-memory store and
//! drive it with `tower::ServiceExt::oneshot`, so the whole API surface is
//! exercised without a database or a listening socket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p orchard-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::IpAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use axum::{Router, routing::get};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use orchard_core::{BirthDate, Email, Phone, Role};
use orchard_identity::config::IdentityConfig;
use orchard_identity::db::{MemoryUserStore, UserStore};
use orchard_identity::models::{NewUser, User};
use orchard_identity::routes;
use orchard_identity::state::AppState;

/// The assembled service plus a handle on its store for seeding.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
}

fn test_config() -> IdentityConfig {
    IdentityConfig {
        database_url: SecretString::from("postgres://unused/test"),
        host: "127.0.0.1".parse::<IpAddr>().unwrap(),
        port: 0,
        token_secret: SecretString::from("kx7Qw9mZp3Lr8Tv2Ny5Jc1Hb4Fd6Gs0A-test-signing"),
        sentry_dsn: None,
    }
}

impl TestApp {
    /// Build the full router over a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryUserStore::new());
        let state = AppState::new(test_config(), Arc::clone(&store) as Arc<dyn UserStore>);

        let router = Router::new()
            .route("/health", get(|| async { "ok" }))
            .merge(routes::routes())
            .with_state(state);

        Self { store, router }
    }

    /// Send a JSON request and return the response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Register a user with the given email, returning the response body.
    pub async fn register(&self, email: &str, password: &str, answer: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/register",
                None,
                Some(register_payload(email, password, answer)),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    /// Log in and return the session token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        body["token"].as_str().unwrap().to_owned()
    }

    /// Seed a user directly in the store, bypassing the API.
    pub async fn seed_user(&self, email: &str, password: &str, role: Role) -> User {
        let new_user = NewUser {
            name: "Seeded".to_owned(),
            email: Email::parse(email).unwrap(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            phone: Phone::parse("+6591234567").unwrap(),
            address: "1 Road".to_owned(),
            dob: BirthDate::parse("1990-01-01").unwrap(),
            security_answer: "blue".to_owned(),
            role,
        };
        self.store.insert(new_user).await.unwrap()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete, valid registration payload for the given email.
#[must_use]
pub fn register_payload(email: &str, password: &str, answer: &str) -> Value {
    json!({
        "name": "Jo",
        "email": email,
        "password": password,
        "phone": "+6591234567",
        "address": "1 Road",
        "dob": "1999-05-02",
        "answer": answer,
    })
}

/// Read a response body as JSON.
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert that no key anywhere in the JSON tree leaks credentials.
pub fn assert_no_secret_keys(value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let lowered = key.to_lowercase();
                assert!(
                    !lowered.contains("password") && !lowered.contains("answer"),
                    "response leaks secret key: {key}"
                );
                assert_no_secret_keys(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                assert_no_secret_keys(item);
            }
        }
        _ => {}
    }
}
