pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod queries;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

pub use config::Config;
pub use database::{DbConn, DbPool};
pub use error::{Error, Result};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, SharedStore, Store};

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use http::{HeaderValue, Method, header};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Load configuration from environment variables
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}

/// Builds the full API router over `state`.
///
/// `/signup`, `/login` and `/health` are public. Everything under
/// `/invoices` requires a bearer token.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server);

    let invoice_routes = Router::new()
        .route(
            "/invoices",
            post(handlers::create_invoice).get(handlers::list_invoices),
        )
        .route(
            "/invoices/{id}",
            put(handlers::update_invoice).delete(handlers::delete_invoice),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::jwt_auth_middleware,
        ));

    Router::new()
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/health", get(handlers::health_check))
        .merge(invoice_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured frontend origin, or any origin for `*`.
///
/// Requests from other origins get no `Access-Control-Allow-Origin` header.
fn cors_layer(server: &config::ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if server.allows_any_origin() {
        return base.allow_origin(Any);
    }

    match HeaderValue::from_str(server.frontend_url.trim()) {
        Ok(origin) => base
            .allow_origin(AllowOrigin::list([origin]))
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(
                frontend_url = %server.frontend_url,
                "frontend_url is not a valid origin, allowing any origin"
            );
            base.allow_origin(Any)
        }
    }
}

/// Binds `server.host:server.port` and serves until Ctrl-C or SIGTERM.
pub async fn run_api_server(state: AppState) -> Result<()> {
    let address = state.config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind {}: {}", address, e)))?;

    tracing::info!(%address, "Bill Desk API listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
