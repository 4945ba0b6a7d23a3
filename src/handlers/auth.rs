//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::app_state::AppState;
use crate::auth::{AuthTokenResponse, LoginRequest, RegisterRequest};
use crate::error::ApiResult;
use crate::middleware::AuthenticatedUser;
use crate::models::{ApiResponse, UserResponse};

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthTokenResponse>>)> {
    let tokens = app_state.auth_service.register(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tokens))))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthTokenResponse>>> {
    let tokens = app_state.auth_service.login(request).await?;

    Ok(Json(ApiResponse::ok(tokens)))
}

/// GET /api/auth/me
pub async fn me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let profile = app_state.auth_service.get_user(user.user_id).await?;

    Ok(Json(ApiResponse::ok(profile)))
}
