//! Middleware for the UtsavHub API
//!
//! Request tracing, security headers, and authentication extractors.

pub mod auth;
mod security;
mod tracing;

pub use auth::{AdminUser, AuthenticatedUser, GuestUser, VendorUser};
pub use security::security_headers;
pub use tracing::request_tracing;
