use bill_desk::{AppState, Config, MemoryStore, build_router};
use reqwest::{Client, redirect::Policy};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// HTTP test application wrapper
///
/// Serves the real router over an in-memory store on a random port.
/// Each test gets its own server and store, so tests run in parallel.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client for making requests
    pub client: Client,
    /// Application config
    pub config: Config,
    /// Direct handle on the backing store for assertions
    pub store: MemoryStore,
}

impl TestApp {
    /// Create a new HTTP test app with server on random port
    ///
    /// # Example
    /// ```rust
    /// #[tokio::test]
    /// async fn test_health_endpoint() {
    ///     let app = TestApp::new().await;
    ///
    ///     let response = app.client
    ///         .get(&app.url("/health"))
    ///         .send()
    ///         .await
    ///         .unwrap();
    ///
    ///     assert_eq!(response.status(), 200);
    /// }
    /// ```
    pub async fn new() -> Self {
        Self::with_config(Self::test_config()).await
    }

    /// Default config with the test JWT secret
    pub fn test_config() -> Config {
        let mut config = Config::default();
        config.jwt.secret = TEST_JWT_SECRET.to_string().into();
        config
    }

    /// Create a test app with a custom config, e.g. a fixed CORS origin
    pub async fn with_config(config: Config) -> Self {
        let store = MemoryStore::new();
        let app_state = AppState::new(Arc::new(store.clone()), config.clone());
        let app = build_router(app_state);

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        // Start server in background
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            client,
            config,
            store,
        }
    }

    /// Get the full URL for an API endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
