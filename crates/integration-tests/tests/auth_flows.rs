//! Integration tests for registration, login, and password reset.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use orchard_integration_tests::{TestApp, assert_no_secret_keys, read_json, register_payload};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new();

    let body = app.register("JO@EX.com", "secret1", "Blue").await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("User registered successfully"));
    assert_eq!(body["user"]["email"], json!("jo@ex.com"));
    assert_eq!(body["user"]["role"], json!(0));
    assert_no_secret_keys(&body);

    // Login with a differently-cased, padded email
    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": " jo@Ex.Com ", "password": "secret1" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("Login Successful"));
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_no_secret_keys(&body);
}

#[tokio::test]
async fn test_register_missing_fields_report_in_order() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/auth/register", None, Some(json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("Name is Required"));

    let mut payload = register_payload("jo@ex.com", "secret1", "Blue");
    payload["dob"] = json!("   ");
    let response = app
        .request("POST", "/api/v1/auth/register", None, Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("DOB is Required"));
}

#[tokio::test]
async fn test_duplicate_registration_is_200_with_success_false() {
    let app = TestApp::new();
    app.register("jo@ex.com", "secret1", "Blue").await;

    // Same account, different casing
    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(register_payload("JO@EX.COM", "secret1", "Blue")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Already registered, please login"));

    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("jo@ex.com", "secret1", "Blue").await;

    let unknown = app
        .request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "nobody@ex.com", "password": "secret1" })),
        )
        .await;
    let wrong = app
        .request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "jo@ex.com", "password": "wrong-password" })),
        )
        .await;

    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);

    let unknown_body = read_json(unknown).await;
    let wrong_body = read_json(wrong).await;
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["message"], json!("Invalid Email or Password"));
}

#[tokio::test]
async fn test_forgot_password_rotates_credential() {
    let app = TestApp::new();
    app.register("jo@ex.com", "secret1", "Blue").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/forgot-password",
            None,
            Some(json!({
                "email": "jo@ex.com",
                "answer": " BLUE ",
                "newPassword": "fresh-secret",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("Password Reset Successfully"));

    // Old password no longer works, new one does
    let old = app
        .request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "jo@ex.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(old.status(), StatusCode::BAD_REQUEST);

    app.login("jo@ex.com", "fresh-secret").await;
}

#[tokio::test]
async fn test_forgot_password_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("jo@ex.com", "secret1", "Blue").await;

    let wrong_answer = app
        .request(
            "POST",
            "/api/v1/auth/forgot-password",
            None,
            Some(json!({
                "email": "jo@ex.com",
                "answer": "red",
                "newPassword": "fresh-secret",
            })),
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/v1/auth/forgot-password",
            None,
            Some(json!({
                "email": "nobody@ex.com",
                "answer": "blue",
                "newPassword": "fresh-secret",
            })),
        )
        .await;

    assert_eq!(wrong_answer.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(wrong_answer).await, read_json(unknown_email).await);
}

#[tokio::test]
async fn test_forgot_password_missing_new_password() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/v1/auth/forgot-password",
            None,
            Some(json!({ "email": "jo@ex.com", "answer": "blue" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], json!("New Password is Required"));
}
