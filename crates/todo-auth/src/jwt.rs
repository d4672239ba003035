//! Access token creation and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. Verification checks
//! the signature and the `exp` claim.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use todo_config::JwtConfig;
use todo_core::AppError;

use crate::claims::Claims;

/// Creates an access token whose subject is `user_id`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now.saturating_add(jwt_config.access_token_expiry).max(0);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns its claims.
///
/// # Errors
///
/// Returns an authentication error if the signature is invalid, the token has
/// expired or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Invalid or expired token")))
}
