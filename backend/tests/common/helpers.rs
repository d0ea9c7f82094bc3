//! Shared test helper functions

use std::time::{SystemTime, UNIX_EPOCH};

use crate::common::TestApp;

pub const TEST_PASSWORD: &str = "SecurePass123!";

/// Generates a unique test email using nanosecond timestamp
pub fn generate_test_email() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let random: u32 = rand::random();
    format!("test_{}_{}@example.com", timestamp, random)
}

/// Signs up a fresh user, logs in, and returns the token from login
pub async fn signup_and_login(app: &TestApp) -> String {
    let email = generate_test_email();

    let signup_response = app
        .client
        .post(app.url("/signup"))
        .json(&serde_json::json!({
            "username": "tester",
            "email": email,
            "password": TEST_PASSWORD
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(signup_response.status(), 201);

    let login_response = app
        .client
        .post(app.url("/login"))
        .json(&serde_json::json!({
            "email": email,
            "password": TEST_PASSWORD
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(login_response.status(), 200);

    let login_body: serde_json::Value = login_response.json().await.unwrap();
    login_body["token"].as_str().unwrap().to_string()
}

/// Creates an invoice and returns the response body
pub async fn create_invoice(
    app: &TestApp,
    token: &str,
    amount: f64,
    description: &str,
) -> serde_json::Value {
    let response = app
        .client
        .post(app.url("/invoices"))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "amount": amount,
            "description": description
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    response.json().await.unwrap()
}
