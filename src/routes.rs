//! Route definitions for the UtsavHub API

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::*;

// Auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
}

// Booking routes
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/guest", get(list_guest_bookings))
        .route("/api/bookings/vendor", get(list_vendor_bookings))
        .route("/api/bookings/vendor/stats", get(vendor_booking_stats))
        .route("/api/bookings/:id", get(get_booking))
        .route("/api/bookings/:id/status", patch(update_booking_status))
        .route("/api/bookings/:id/cancel", patch(cancel_booking))
}

// Payout routes
pub fn payout_routes() -> Router<AppState> {
    Router::new()
        .route("/api/payouts", post(request_payout).get(list_payouts))
        .route("/api/payouts/vendor", get(list_vendor_payouts))
        .route("/api/payouts/stats", get(payout_stats))
        .route("/api/payouts/:id", get(get_payout))
        .route("/api/payouts/:id/status", put(update_payout_status))
}
