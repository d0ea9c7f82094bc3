use crate::error::{Error, Result};
use crate::models::users::User;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Expiration time as Unix timestamp
    pub exp: i64,
    /// Issued at time as Unix timestamp
    pub iat: i64,
}

/// Generates a signed token for `user`, valid for `expiration_hours`.
///
/// # Example
/// ```rust,no_run
/// use bill_desk::services::jwt::{generate_token, verify_token};
/// # fn demo(user: &bill_desk::models::users::User) -> bill_desk::error::Result<()> {
/// let token = generate_token(user, "my-secret", 24)?;
/// let claims = verify_token(&token, "my-secret")?;
/// assert_eq!(claims.id, user.id);
/// # Ok(())
/// # }
/// ```
pub fn generate_token(user: &User, secret: &str, expiration_hours: i64) -> Result<String> {
    let now = Utc::now();
    let expiration = TimeDelta::try_hours(expiration_hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            Error::Internal(format!(
                "Token lifetime of {} hours is out of range",
                expiration_hours
            ))
        })?;

    let claims = Claims {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        exp: expiration.timestamp(),
        iat: now.timestamp(),
    };

    encode_claims(&claims, secret)
}

pub(crate) fn encode_claims(claims: &Claims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| Error::Internal(format!("Failed to generate JWT: {}", e)))
}

/// Verifies a token and returns its claims.
///
/// # Errors
/// [`Error::InvalidToken`] if the token is expired, has a bad signature or
/// cannot be decoded.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => Error::InvalidToken("Token has expired".to_string()),
        ErrorKind::InvalidSignature => Error::InvalidToken("Invalid token signature".to_string()),
        _ => Error::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Extracts the Bearer token from the Authorization header
///
/// # Errors
/// [`Error::Authentication`] when the header is missing, uses another scheme
/// or carries an empty token.
pub fn extract_bearer_token(auth_header: Option<&str>) -> Result<&str> {
    let header = auth_header
        .ok_or_else(|| Error::Authentication("Missing Authorization header".to_string()))?;

    // The scheme name is case-insensitive
    let (scheme, token) = header.trim().split_once(' ').unwrap_or((header.trim(), ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::Authentication(
            "Invalid Authorization header format. Expected: 'Bearer <token>'".to_string(),
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Authentication("Empty token".to_string()));
    }
    Ok(token)
}

/// Header-to-claims in one step: missing token is 401, bad token is 403.
pub fn authenticate_bearer(auth_header: Option<&str>, secret: &str) -> Result<Claims> {
    let token = extract_bearer_token(auth_header)?;
    verify_token(token, secret)
}
