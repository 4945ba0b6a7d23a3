//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthService;
use crate::booking::BookingService;
use crate::payout::PayoutService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub booking_service: Arc<BookingService>,
    pub payout_service: Arc<PayoutService>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        booking_service: Arc<BookingService>,
        payout_service: Arc<PayoutService>,
    ) -> Self {
        Self {
            auth_service,
            booking_service,
            payout_service,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<BookingService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.booking_service.clone()
    }
}

impl FromRef<AppState> for Arc<PayoutService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.payout_service.clone()
    }
}
