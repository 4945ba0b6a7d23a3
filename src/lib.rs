//! UtsavHub Backend Library
//!
//! Booking lifecycle and payout settlement core for a multi-vendor
//! wedding/event marketplace.

pub mod app_state;
pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod payout;
pub mod routes;
