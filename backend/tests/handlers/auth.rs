use bill_desk::{Store, services::jwt::verify_token};

use crate::common::{TestApp, generate_test_email, test_app::TEST_JWT_SECRET};

#[tokio::test]
async fn test_signup_returns_201_with_user_and_token() {
    let app = TestApp::new().await;
    let email = generate_test_email();

    let response = app
        .client
        .post(app.url("/signup"))
        .json(&serde_json::json!({
            "username": "alice",
            "email": email,
            "password": "secret1"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("application/json"));

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["user"]["id"].is_string());
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    let claims = verify_token(body["token"].as_str().unwrap(), TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.email, email);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.id.to_string(), body["user"]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_signup_stores_hashed_password() {
    let app = TestApp::new().await;
    let email = generate_test_email();

    app.client
        .post(app.url("/signup"))
        .json(&serde_json::json!({
            "username": "alice",
            "email": email,
            "password": "secret1"
        }))
        .send()
        .await
        .unwrap();

    let stored = app.store.get_user_by_email(&email).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "secret1");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_signup_duplicate_email_returns_400() {
    let app = TestApp::new().await;
    let email = generate_test_email();
    let body = serde_json::json!({
        "username": "alice",
        "email": email,
        "password": "secret1"
    });

    let first = app.client.post(app.url("/signup")).json(&body).send().await.unwrap();
    assert_eq!(first.status(), 201);

    let second = app.client.post(app.url("/signup")).json(&body).send().await.unwrap();
    assert_eq!(second.status(), 400);
    let error: serde_json::Value = second.json().await.unwrap();
    assert_eq!(error["message"], "User already exists");
    assert_eq!(app.store.user_count(), 1);
}

#[tokio::test]
async fn test_signup_validation_returns_400_with_fields() {
    let app = TestApp::new().await;

    let response = app
        .client
        .post(app.url("/signup"))
        .json(&serde_json::json!({
            "username": "al",
            "email": "not-an-email",
            "password": "123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fields"]["username"].is_string());
    assert!(body["fields"]["email"].is_string());
    assert!(body["fields"]["password"].is_string());
}

#[tokio::test]
async fn test_signup_malformed_json_returns_400() {
    let app = TestApp::new().await;

    let response = app
        .client
        .post(app.url("/signup"))
        .header("Content-Type", "application/json")
        .body("{\"username\":")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_login_returns_200_with_token() {
    let app = TestApp::new().await;
    let email = generate_test_email();

    app.client
        .post(app.url("/signup"))
        .json(&serde_json::json!({
            "username": "bob",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .post(app.url("/login"))
        .json(&serde_json::json!({
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Success");

    let claims = verify_token(body["token"].as_str().unwrap(), TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.email, email);
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[tokio::test]
async fn test_login_unknown_email_returns_404() {
    let app = TestApp::new().await;

    let response = app
        .client
        .post(app.url("/login"))
        .json(&serde_json::json!({
            "email": generate_test_email(),
            "password": "password123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_login_wrong_password_returns_401() {
    let app = TestApp::new().await;
    let email = generate_test_email();

    app.client
        .post(app.url("/signup"))
        .json(&serde_json::json!({
            "username": "bob",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .post(app.url("/login"))
        .json(&serde_json::json!({
            "email": email,
            "password": "wrongpassword"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Incorrect password");
}
