//! Authentication middleware
//!
//! Extractors for JWT verification and role-based authorization.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{verify_token, AuthService, JwtError};
use crate::error::ApiError;
use crate::models::UserRole;

/// Authenticated user extracted from the JWT bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    ApiError::Unauthorized(
                        "Authorization header with Bearer token required".to_string(),
                    )
                    .into_response()
                })?;

        let auth_service = Arc::<AuthService>::from_ref(state);

        let claims = verify_token(bearer.token(), auth_service.jwt_secret()).map_err(|e| {
            let message = match e {
                JwtError::TokenExpired => "Token has expired",
                _ => "Invalid token",
            };
            ApiError::Unauthorized(message.to_string()).into_response()
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            ApiError::Unauthorized("Invalid user ID in token".to_string()).into_response()
        })?;

        let role = UserRole::parse(&claims.role).ok_or_else(|| {
            ApiError::Unauthorized("Invalid role in token".to_string()).into_response()
        })?;

        Ok(AuthenticatedUser { user_id, role })
    }
}

fn require_role(user: &AuthenticatedUser, role: UserRole) -> Result<(), Response> {
    if user.role != role {
        return Err(ApiError::Forbidden(format!(
            "{} access required",
            match role {
                UserRole::Guest => "Guest",
                UserRole::Vendor => "Vendor",
                UserRole::Admin => "Admin",
            }
        ))
        .into_response());
    }
    Ok(())
}

/// Extractor requiring the guest role
pub struct GuestUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for GuestUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        require_role(&user, UserRole::Guest)?;
        Ok(GuestUser(user))
    }
}

/// Extractor requiring the vendor role
pub struct VendorUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for VendorUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        require_role(&user, UserRole::Vendor)?;
        Ok(VendorUser(user))
    }
}

/// Extractor requiring the admin role
pub struct AdminUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        require_role(&user, UserRole::Admin)?;
        Ok(AdminUser(user))
    }
}
