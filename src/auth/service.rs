//! Authentication service
//!
//! Minimal identity collaborator for the booking/payout core: registration,
//! login and profile lookup, issuing JWT access tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{unique_violation_to_conflict, ApiError, ApiResult};
use crate::models::{User, UserResponse, UserRole};

use super::jwt::generate_access_token;

const DUPLICATE_EMAIL: &str = "Email is already registered";

/// Registration request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub phone: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    pub role: UserRole,
    pub business_name: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response returned by register and login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
    jwt_secret: String,
    access_token_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(db_pool: PgPool, jwt_secret: String, access_token_ttl_seconds: i64) -> Self {
        Self {
            db_pool,
            jwt_secret,
            access_token_ttl_seconds,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Register a new user and issue an access token
    pub async fn register(&self, request: RegisterRequest) -> ApiResult<AuthTokenResponse> {
        request.validate()?;

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))?;

        let id = Uuid::new_v4();
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, phone, password_hash, role, business_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(request.email.to_lowercase())
        .bind(&request.phone)
        .bind(&password_hash)
        .bind(request.role)
        .bind(&request.business_name)
        .bind(now)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| unique_violation_to_conflict(e, DUPLICATE_EMAIL))?;

        tracing::info!(user_id = %user.id, role = %user.role.as_str(), "User registered");

        self.issue_token(user)
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, request: LoginRequest) -> ApiResult<AuthTokenResponse> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(request.email.to_lowercase())
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| ApiError::InternalError(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(ApiError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.issue_token(user)
    }

    /// Fetch a user's profile by id
    pub async fn get_user(&self, id: Uuid) -> ApiResult<UserResponse> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    fn issue_token(&self, user: User) -> ApiResult<AuthTokenResponse> {
        let token = generate_access_token(&user, &self.jwt_secret, self.access_token_ttl_seconds)
            .map_err(|e| ApiError::InternalError(format!("Token generation failed: {}", e)))?;

        Ok(AuthTokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_ttl_seconds,
            user: user.into(),
        })
    }
}
