use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;

use crate::{
    entity::users::{Column as UserCol, Entity as Users, Model as UserModel},
    error::AppError,
    models::UserRole,
    state::AppState,
};

/// Token claims issued by the external identity provider. `sub` is the
/// provider-side user id; the application never mints these tokens itself.
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub external_id: String,
}

/// Resolve the authenticated caller to a stored user and require the ADMIN
/// role. Every admin-scoped operation goes through this one guard; the
/// returned record doubles as the capability handed to the service layer.
pub async fn require_admin(state: &AppState, user: &AuthUser) -> Result<UserModel, AppError> {
    let stored = Users::find()
        .filter(UserCol::ClerkUserId.eq(user.external_id.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if stored.role != UserRole::Admin.as_str() {
        return Err(AppError::Forbidden);
    }

    Ok(stored)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized);
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?;

        Ok(AuthUser {
            external_id: decoded.claims.sub,
        })
    }
}
