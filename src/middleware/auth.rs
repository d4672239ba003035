use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use todo_auth::{Claims, verify_token};
use todo_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer token and provides the caller's identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token.trim(), &state.jwt_config)?;
        let user_id = claims.user_id()?;

        Ok(AuthUser { user_id, claims })
    }
}
