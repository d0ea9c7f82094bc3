use crate::common::TestApp;

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let app = TestApp::new().await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_needs_no_token() {
    let app = TestApp::new().await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("Authorization", "Bearer not-a-token")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}
