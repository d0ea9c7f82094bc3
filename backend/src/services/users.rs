use crate::{
    error::{Error, Result},
    models::users::{LoginRequest, NewUser, PublicUser, SignupRequest},
    queries::users::USER_EXISTS,
    services::jwt::generate_token,
    store::Store,
    validation::{merge_errors, validate_email, validate_password, validate_username},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Token settings the auth services need from configuration.
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings<'a> {
    pub secret: &'a str,
    pub expiration_hours: i64,
}

/// Validates, hashes and stores a new user, then issues their first token.
pub async fn signup(
    store: &dyn Store,
    tokens: TokenSettings<'_>,
    request: SignupRequest,
) -> Result<(PublicUser, String)> {
    let checks = (
        validate_username(&request.username),
        validate_email(&request.email),
        validate_password(&request.password),
    );
    let (username, email) = match checks {
        (Ok(username), Ok(email), Ok(())) => (username, email),
        (username, email, password) => {
            let failures = [username.err(), email.err(), password.err()];
            return Err(merge_errors(failures.into_iter().flatten()));
        }
    };

    if store.get_user_by_email(&email).await?.is_some() {
        tracing::debug!("signup rejected, email already registered");
        return Err(Error::BadRequest(USER_EXISTS.to_string()));
    }

    let password_hash = hash_password(&request.password)?;
    let user = store
        .create_user(NewUser {
            username,
            email,
            password_hash,
        })
        .await?;

    let token = generate_token(&user, tokens.secret, tokens.expiration_hours)?;
    tracing::info!(user_id = %user.id, "user signed up");

    Ok((user.into(), token))
}

/// Checks credentials and issues a token.
///
/// Unknown email is `NotFound`, a wrong password is `Authentication`.
pub async fn login(
    store: &dyn Store,
    tokens: TokenSettings<'_>,
    request: LoginRequest,
) -> Result<String> {
    let email = request.email.trim();

    let user = store
        .get_user_by_email(email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if !verify_password(&request.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "login rejected, incorrect password");
        return Err(Error::Authentication("Incorrect password".to_string()));
    }

    let token = generate_token(&user, tokens.secret, tokens.expiration_hours)?;
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(token)
}

/// Hashes a password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a password hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
