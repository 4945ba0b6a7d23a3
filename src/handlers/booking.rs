//! Booking API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::booking::{
    BookingDetails, CreateBookingRequest, UpdateBookingStatusRequest, VendorBookingStats,
};
use crate::error::ApiResult;
use crate::middleware::{AuthenticatedUser, GuestUser, VendorUser};
use crate::models::ApiResponse;

/// POST /api/bookings - guest creates a booking request
pub async fn create_booking(
    State(app_state): State<AppState>,
    GuestUser(guest): GuestUser,
    Json(request): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<BookingDetails>>)> {
    let booking = app_state
        .booking_service
        .create(guest.user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// GET /api/bookings/guest - the guest's own bookings
pub async fn list_guest_bookings(
    State(app_state): State<AppState>,
    GuestUser(guest): GuestUser,
) -> ApiResult<Json<ApiResponse<Vec<BookingDetails>>>> {
    let bookings = app_state
        .booking_service
        .list_for_guest(guest.user_id)
        .await?;

    Ok(Json(ApiResponse::list(bookings)))
}

/// GET /api/bookings/vendor - the vendor's incoming bookings
pub async fn list_vendor_bookings(
    State(app_state): State<AppState>,
    VendorUser(vendor): VendorUser,
) -> ApiResult<Json<ApiResponse<Vec<BookingDetails>>>> {
    let bookings = app_state
        .booking_service
        .list_for_vendor(vendor.user_id)
        .await?;

    Ok(Json(ApiResponse::list(bookings)))
}

/// GET /api/bookings/vendor/stats - per-status booking counts
pub async fn vendor_booking_stats(
    State(app_state): State<AppState>,
    VendorUser(vendor): VendorUser,
) -> ApiResult<Json<ApiResponse<VendorBookingStats>>> {
    let stats = app_state
        .booking_service
        .vendor_stats(vendor.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/bookings/:id - visible to the booking's guest or vendor
pub async fn get_booking(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<BookingDetails>>> {
    let booking = app_state.booking_service.get(&id, user.user_id).await?;

    Ok(Json(ApiResponse::ok(booking)))
}

/// PATCH /api/bookings/:id/status - vendor transitions the booking
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    VendorUser(vendor): VendorUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> ApiResult<Json<ApiResponse<BookingDetails>>> {
    let booking = app_state
        .booking_service
        .update_status(&id, vendor.user_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(booking)))
}

/// PATCH /api/bookings/:id/cancel - guest withdraws the booking
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    GuestUser(guest): GuestUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<BookingDetails>>> {
    let booking = app_state.booking_service.cancel(&id, guest.user_id).await?;

    Ok(Json(ApiResponse::ok(booking)))
}
