//! Payout API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::{AdminUser, AuthenticatedUser, VendorUser};
use crate::models::{ApiResponse, UserRole};
use crate::payout::{
    ListPayoutsQuery, PayoutDetails, PayoutStats, RequestPayoutRequest, UpdatePayoutStatusRequest,
};

/// POST /api/payouts - vendor requests settlement for a completed booking
pub async fn request_payout(
    State(app_state): State<AppState>,
    VendorUser(vendor): VendorUser,
    Json(request): Json<RequestPayoutRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PayoutDetails>>)> {
    let payout = app_state
        .payout_service
        .request(vendor.user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(payout))))
}

/// GET /api/payouts/vendor - the vendor's own payouts
pub async fn list_vendor_payouts(
    State(app_state): State<AppState>,
    VendorUser(vendor): VendorUser,
) -> ApiResult<Json<ApiResponse<Vec<PayoutDetails>>>> {
    let payouts = app_state
        .payout_service
        .list_for_vendor(vendor.user_id)
        .await?;

    Ok(Json(ApiResponse::list(payouts)))
}

/// GET /api/payouts - admin listing with optional status/vendor filters
pub async fn list_payouts(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(filter): Query<ListPayoutsQuery>,
) -> ApiResult<Json<ApiResponse<Vec<PayoutDetails>>>> {
    let payouts = app_state.payout_service.list_all(filter).await?;

    Ok(Json(ApiResponse::list(payouts)))
}

/// GET /api/payouts/stats - platform-wide settlement statistics
pub async fn payout_stats(
    State(app_state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<ApiResponse<PayoutStats>>> {
    let stats = app_state.payout_service.stats().await?;

    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/payouts/:id - admin, or the vendor who owns the payout
pub async fn get_payout(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<PayoutDetails>>> {
    let payout = app_state.payout_service.details(&id).await?;

    let allowed = match user.role {
        UserRole::Admin => true,
        UserRole::Vendor => payout.vendor_id == user.user_id,
        UserRole::Guest => false,
    };
    if !allowed {
        return Err(ApiError::Forbidden(
            "Not authorized to view this payout".to_string(),
        ));
    }

    Ok(Json(ApiResponse::ok(payout)))
}

/// PUT /api/payouts/:id/status - admin drives the settlement
pub async fn update_payout_status(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePayoutStatusRequest>,
) -> ApiResult<Json<ApiResponse<PayoutDetails>>> {
    let payout = app_state
        .payout_service
        .update_status(&id, admin.user_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(payout)))
}
