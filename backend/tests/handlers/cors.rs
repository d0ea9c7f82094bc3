use crate::common::TestApp;

const FRONTEND: &str = "http://localhost:3000";

async fn app_with_frontend(frontend_url: &str) -> TestApp {
    let mut config = TestApp::test_config();
    config.server.frontend_url = frontend_url.to_string();
    TestApp::with_config(config).await
}

#[tokio::test]
async fn test_wildcard_origin_allows_any_origin() {
    let app = TestApp::new().await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("Origin", "http://anywhere.example")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(headers.get("access-control-allow-credentials").is_none());
}

#[tokio::test]
async fn test_explicit_origin_is_allowed_with_credentials() {
    let app = app_with_frontend(FRONTEND).await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("Origin", FRONTEND)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], FRONTEND);
    assert_eq!(headers["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn test_other_origin_gets_no_allow_origin_header() {
    let app = app_with_frontend(FRONTEND).await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("Origin", "http://evil.example")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_preflight_for_protected_route_skips_auth() {
    let app = app_with_frontend(FRONTEND).await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/invoices"))
        .header("Origin", FRONTEND)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization,content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], FRONTEND);
    let allowed_methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(allowed_methods.contains("POST"));
}

#[tokio::test]
async fn test_unparsable_origin_falls_back_to_any_origin() {
    let app = app_with_frontend("http://local\nhost:3000").await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("Origin", "http://anywhere.example")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
