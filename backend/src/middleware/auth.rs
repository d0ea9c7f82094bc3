//! Bearer-token authentication middleware
//!
//! Verifies the `Authorization: Bearer <token>` header and exposes the
//! decoded claims to handlers as [`AuthenticatedUser`].

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::Result,
    services::jwt::{Claims, authenticate_bearer},
    state::AppState,
};

/// Authenticated user extracted from the token claims
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            email: claims.email,
        }
    }
}

/// Token authentication middleware
///
/// # Behavior
/// - No token: 401
/// - Invalid, tampered or expired token: 403
/// - Valid token: inserts `AuthenticatedUser` into request extensions
///
/// # Usage
/// ```ignore
/// Router::new()
///     .route("/invoices", get(list_invoices))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         jwt_auth_middleware,
///     ))
/// ```
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());

    let claims = authenticate_bearer(auth_header, state.jwt_secret()).inspect_err(|e| {
        tracing::debug!(error = %e, path = %request.uri().path(), "request not authenticated");
    })?;

    request.extensions_mut().insert(AuthenticatedUser::from(claims));
    Ok(next.run(request).await)
}
