use thiserror::Error;
use std::collections::HashMap;
use serde::Serialize;

// Import Axum types for HTTP response conversion
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Message returned for every 5xx response. Details go to the log only.
pub const GENERIC_SERVER_ERROR: &str = "Server error. Please try again later.";

/// Structured validation errors with field-level error mapping
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ValidationErrors {
    Single { field: String, message: String },
    Multiple { fields: HashMap<String, String> },
}

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self::Single {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Field name to message map, regardless of variant.
    pub fn fields(&self) -> HashMap<String, String> {
        match self {
            Self::Single { field, message } => HashMap::from([(field.clone(), message.clone())]),
            Self::Multiple { fields } => fields.clone(),
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single { field, message } => write!(f, "{}: {}", field, message),
            Self::Multiple { fields } => {
                let mut entries: Vec<_> = fields.iter().collect();
                entries.sort();
                let joined: Vec<String> = entries
                    .into_iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A migration failure while connecting the store.
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A validation error with field-level details.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A malformed request that is not tied to a single field.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or unusable credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A token that is present but invalid or expired.
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::InvalidToken(_) => StatusCode::FORBIDDEN,
            Error::Sqlx(_)
            | Error::Migrate(_)
            | Error::Internal(_)
            | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::BadRequest(_) => "BAD_REQUEST",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Authentication(_) => "AUTHENTICATION_FAILED",
            Error::InvalidToken(_) => "INVALID_TOKEN",
            Error::Sqlx(_) | Error::Migrate(_) | Error::Internal(_) => "INTERNAL_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Convert custom Error to HTTP response
///
/// Client errors carry their message. Server errors are logged with full
/// detail and answered with [`GENERIC_SERVER_ERROR`].
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let body = match &self {
            Error::Validation(errors) => serde_json::json!({
                "message": "Validation failed",
                "code": code,
                "fields": errors.fields(),
            }),
            Error::BadRequest(msg)
            | Error::NotFound(msg)
            | Error::Authentication(msg)
            | Error::InvalidToken(msg) => serde_json::json!({
                "message": msg,
                "code": code,
            }),
            Error::Sqlx(_)
            | Error::Migrate(_)
            | Error::Internal(_)
            | Error::Config(_) => {
                tracing::error!(error = %self, "request failed");
                serde_json::json!({
                    "message": GENERIC_SERVER_ERROR,
                    "code": code,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}
