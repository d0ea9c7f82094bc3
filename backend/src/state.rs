use crate::{config::Config, services::users::TokenSettings, store::SharedStore};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend
    pub store: SharedStore,
    /// Loaded configuration, read-only after startup
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        self.config.jwt.secret.expose_secret()
    }

    pub fn token_settings(&self) -> TokenSettings<'_> {
        TokenSettings {
            secret: self.jwt_secret(),
            expiration_hours: self.config.jwt.expiration_hours,
        }
    }
}
