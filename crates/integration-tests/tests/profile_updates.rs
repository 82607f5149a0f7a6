//! Integration tests for partial profile updates.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use orchard_identity::db::UserStore;
use orchard_integration_tests::{TestApp, assert_no_secret_keys, read_json};

async fn signed_in_app() -> (TestApp, String) {
    let app = TestApp::new();
    app.register("jo@ex.com", "secret1", "Blue").await;
    let token = app.login("jo@ex.com", "secret1").await;
    (app, token)
}

#[tokio::test]
async fn test_update_single_field_keeps_others() {
    let (app, token) = signed_in_app().await;

    let response = app
        .request(
            "PUT",
            "/api/v1/auth/profile",
            Some(&format!("Bearer {token}")),
            Some(json!({ "name": "Joanna" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("Profile updated successfully"));
    assert_eq!(body["updated_user"]["name"], json!("Joanna"));
    assert_eq!(body["updated_user"]["email"], json!("jo@ex.com"));
    assert_eq!(body["updated_user"]["phone"], json!("+6591234567"));
    assert_no_secret_keys(&body);
}

#[tokio::test]
async fn test_update_with_empty_body_rejected() {
    let (app, token) = signed_in_app().await;

    let response = app
        .request(
            "PUT",
            "/api/v1/auth/profile",
            Some(&format!("Bearer {token}")),
            Some(json!({})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("Request body is empty"));
}

#[tokio::test]
async fn test_update_null_field_rejected() {
    let (app, token) = signed_in_app().await;

    let response = app
        .request(
            "PUT",
            "/api/v1/auth/profile",
            Some(&format!("Bearer {token}")),
            Some(json!({ "dob": null })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("Invalid input. DOB cannot be null."));
}

#[tokio::test]
async fn test_update_blank_field_rejected() {
    let (app, token) = signed_in_app().await;

    let response = app
        .request(
            "PUT",
            "/api/v1/auth/profile",
            Some(&format!("Bearer {token}")),
            Some(json!({ "phone": "   " })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("Phone cannot be empty"));
}

#[tokio::test]
async fn test_update_invalid_dob_rejected_and_nothing_persisted() {
    let (app, token) = signed_in_app().await;

    let response = app
        .request(
            "PUT",
            "/api/v1/auth/profile",
            Some(&format!("Bearer {token}")),
            Some(json!({ "name": "Joanna", "dob": "2021-02-30" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The valid name change must not have been applied either
    let email = "jo@ex.com".parse::<orchard_core::Email>().unwrap();
    let user = app.store.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(user.name, "Jo");
}

#[tokio::test]
async fn test_update_password_takes_effect_on_next_login() {
    let (app, token) = signed_in_app().await;

    let response = app
        .request(
            "PUT",
            "/api/v1/auth/profile",
            Some(&format!("Bearer {token}")),
            Some(json!({ "password": "next-secret" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    app.login("jo@ex.com", "next-secret").await;
}

#[tokio::test]
async fn test_update_email_key_is_ignored() {
    let (app, token) = signed_in_app().await;

    let response = app
        .request(
            "PUT",
            "/api/v1/auth/profile",
            Some(&format!("Bearer {token}")),
            Some(json!({ "name": "Joanna", "email": "other@ex.com" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["updated_user"]["email"], json!("jo@ex.com"));
}

#[tokio::test]
async fn test_update_without_token_rejected() {
    let (app, _token) = signed_in_app().await;

    let response = app
        .request(
            "PUT",
            "/api/v1/auth/profile",
            None,
            Some(json!({ "name": "Joanna" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("Authorization header is invalid"));
}
