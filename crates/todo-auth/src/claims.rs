//! JWT claim structure for access tokens.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use todo_core::AppError;

/// JWT claims carried by an access token.
///
/// - `sub`: the caller's `user_id`, a UUID string
/// - `exp`: expiration timestamp (Unix seconds)
/// - `iat`: issued-at timestamp (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The authenticated identity; a non-UUID subject is rejected as unauthenticated.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid user ID in token")))
    }
}
