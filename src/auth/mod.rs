//! Authentication: JWT tokens and the identity service

pub mod jwt;
pub mod service;

pub use jwt::{generate_access_token, verify_token, Claims, JwtError};
pub use service::{AuthService, AuthTokenResponse, LoginRequest, RegisterRequest};
