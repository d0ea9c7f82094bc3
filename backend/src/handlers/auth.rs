use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use crate::{
    error::Result,
    models::users::{LoginRequest, LoginResponse, SignupRequest, SignupResponse},
    services::users,
    state::AppState,
};

/// POST /signup
///
/// Registers a new user and returns it with a signed token.
///
/// # Request Body
/// - `username`: 3-30 characters
/// - `email`: must be unique and well formed
/// - `password`: at least 6 characters
///
/// # HTTP Status Codes
/// - `201 CREATED`: `{ "user": {...}, "token": "..." }`
/// - `400 BAD_REQUEST`: validation failure or user already exists
/// - `500 INTERNAL_SERVER_ERROR`: store error
pub async fn signup(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let Json(request) = payload?;

    let (user, token) = users::signup(state.store.as_ref(), state.token_settings(), request).await?;

    Ok((StatusCode::CREATED, Json(SignupResponse { user, token })))
}

/// POST /login
///
/// # Request Body
/// - `email`
/// - `password`
///
/// # HTTP Status Codes
/// - `200 OK`: `{ "message": "Success", "token": "..." }`
/// - `401 UNAUTHORIZED`: incorrect password
/// - `404 NOT_FOUND`: no user with that email
/// - `500 INTERNAL_SERVER_ERROR`: store error
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload?;

    let token = users::login(state.store.as_ref(), state.token_settings(), request).await?;

    Ok(Json(LoginResponse {
        message: "Success".to_string(),
        token,
    }))
}
