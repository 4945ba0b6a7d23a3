//! API handlers for the UtsavHub backend

pub mod auth;
pub mod booking;
pub mod payout;

pub use auth::*;
pub use booking::*;
pub use payout::*;
