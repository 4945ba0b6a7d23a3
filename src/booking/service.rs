//! Booking service layer - business logic for the booking lifecycle

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::booking::{
    Booking, BookingDetails, BookingStatus, CreateBookingRequest, UpdateBookingStatusRequest,
    VendorBookingStats,
};
use crate::error::{ApiError, ApiResult};
use crate::models::UserRole;

const DETAILS_SELECT: &str = r#"
    SELECT
        b.*,
        g.name AS guest_name,
        g.email AS guest_email,
        g.phone AS guest_phone,
        v.name AS vendor_name,
        v.email AS vendor_email,
        v.phone AS vendor_phone,
        v.business_name AS vendor_business_name
    FROM bookings b
    JOIN users g ON b.guest_id = g.id
    JOIN users v ON b.vendor_id = v.id
"#;

/// Booking service for managing the booking lifecycle
#[derive(Clone)]
pub struct BookingService {
    db_pool: PgPool,
}

impl BookingService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a booking request against a vendor's listing
    pub async fn create(
        &self,
        guest_id: Uuid,
        request: CreateBookingRequest,
    ) -> ApiResult<BookingDetails> {
        request.validate()?;

        // The vendor reference must resolve to an actual vendor account
        let vendor_exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE id = $1 AND role = $2",
        )
        .bind(request.vendor_id)
        .bind(UserRole::Vendor)
        .fetch_one(&self.db_pool)
        .await?;

        if vendor_exists == 0 {
            return Err(ApiError::NotFound("Vendor not found".to_string()));
        }

        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, guest_id, vendor_id, service_type, service_id,
                event_name, event_date, event_time, guest_count,
                venue, venue_address, contact_person, contact_phone,
                contact_email, special_requests, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $17)
            "#,
        )
        .bind(id)
        .bind(guest_id)
        .bind(request.vendor_id)
        .bind(&request.service_type)
        .bind(&request.service_id)
        .bind(&request.event_name)
        .bind(request.event_date)
        .bind(&request.event_time)
        .bind(request.guest_count)
        .bind(&request.venue)
        .bind(&request.venue_address)
        .bind(&request.contact_person)
        .bind(&request.contact_phone)
        .bind(&request.contact_email)
        .bind(&request.special_requests)
        .bind(BookingStatus::Pending)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(booking_id = %id, guest_id = %guest_id, vendor_id = %request.vendor_id, "Booking created");

        self.details(&id).await
    }

    /// Get a booking with both parties' summary fields joined in
    pub async fn details(&self, id: &Uuid) -> ApiResult<BookingDetails> {
        let query = format!("{} WHERE b.id = $1", DETAILS_SELECT);
        let booking = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

        Ok(booking)
    }

    /// Get a booking, visible only to its guest or vendor
    pub async fn get(&self, id: &Uuid, requester_id: Uuid) -> ApiResult<BookingDetails> {
        let booking = self.details(id).await?;

        if booking.guest_id != requester_id && booking.vendor_id != requester_id {
            return Err(ApiError::Forbidden(
                "Not authorized to view this booking".to_string(),
            ));
        }

        Ok(booking)
    }

    /// List a guest's bookings, newest first
    pub async fn list_for_guest(&self, guest_id: Uuid) -> ApiResult<Vec<BookingDetails>> {
        let query = format!(
            "{} WHERE b.guest_id = $1 ORDER BY b.created_at DESC",
            DETAILS_SELECT
        );
        let bookings = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(guest_id)
            .fetch_all(&self.db_pool)
            .await?;

        Ok(bookings)
    }

    /// List a vendor's bookings, newest first
    pub async fn list_for_vendor(&self, vendor_id: Uuid) -> ApiResult<Vec<BookingDetails>> {
        let query = format!(
            "{} WHERE b.vendor_id = $1 ORDER BY b.created_at DESC",
            DETAILS_SELECT
        );
        let bookings = sqlx::query_as::<_, BookingDetails>(&query)
            .bind(vendor_id)
            .fetch_all(&self.db_pool)
            .await?;

        Ok(bookings)
    }

    /// Vendor-driven status transition with side effects per target state
    pub async fn update_status(
        &self,
        id: &Uuid,
        vendor_id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> ApiResult<BookingDetails> {
        let booking = self.find(id).await?;

        if booking.vendor_id != vendor_id {
            return Err(ApiError::Forbidden(
                "Not authorized to update this booking".to_string(),
            ));
        }

        if !booking.status.can_transition_to(request.status) {
            return Err(ApiError::InvalidTransition(format!(
                "Cannot transition booking from {} to {}",
                booking.status.as_str(),
                request.status.as_str()
            )));
        }

        if request.status == BookingStatus::Rejected {
            match request.rejection_reason.as_deref() {
                Some(reason) if !reason.trim().is_empty() => {}
                _ => {
                    return Err(ApiError::ValidationError(
                        "rejectionReason is required when rejecting a booking".to_string(),
                    ))
                }
            }
        }

        let now = Utc::now();

        // Notes and price overwrite regardless of the target status; the
        // timestamp matching the new status is stamped in the same write.
        sqlx::query(
            r#"
            UPDATE bookings SET
                status = $1,
                vendor_notes = COALESCE($2, vendor_notes),
                total_price = COALESCE($3, total_price),
                rejection_reason = CASE WHEN $1 = 'rejected'::booking_status
                                        THEN $4 ELSE rejection_reason END,
                confirmed_at = CASE WHEN $1 = 'confirmed'::booking_status
                                    THEN $5 ELSE confirmed_at END,
                cancelled_at = CASE WHEN $1 = 'cancelled'::booking_status
                                    THEN $5 ELSE cancelled_at END,
                completed_at = CASE WHEN $1 = 'completed'::booking_status
                                    THEN $5 ELSE completed_at END,
                updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(request.status)
        .bind(&request.vendor_notes)
        .bind(request.total_price)
        .bind(&request.rejection_reason)
        .bind(now)
        .bind(id)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(
            booking_id = %id,
            from = %booking.status.as_str(),
            to = %request.status.as_str(),
            "Booking status updated"
        );

        self.details(id).await
    }

    /// Guest-driven cancellation, allowed while pending or confirmed
    pub async fn cancel(&self, id: &Uuid, guest_id: Uuid) -> ApiResult<BookingDetails> {
        let booking = self.find(id).await?;

        if booking.guest_id != guest_id {
            return Err(ApiError::Forbidden(
                "Not authorized to cancel this booking".to_string(),
            ));
        }

        if !booking.status.guest_cancellable() {
            return Err(ApiError::InvalidTransition(format!(
                "Booking cannot be cancelled in its current status: {}",
                booking.status.as_str()
            )));
        }

        let now = Utc::now();
        sqlx::query(
            r#"
            UPDATE bookings
            SET status = $1, cancelled_at = $2, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(BookingStatus::Cancelled)
        .bind(now)
        .bind(id)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(booking_id = %id, from = %booking.status.as_str(), "Booking cancelled by guest");

        self.details(id).await
    }

    /// Per-status booking counts for a vendor, in a single grouping pass
    pub async fn vendor_stats(&self, vendor_id: Uuid) -> ApiResult<VendorBookingStats> {
        let rows = sqlx::query_as::<_, (BookingStatus, i64)>(
            "SELECT status, COUNT(*) FROM bookings WHERE vendor_id = $1 GROUP BY status",
        )
        .bind(vendor_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(VendorBookingStats::from_rows(&rows))
    }

    /// Fetch the raw booking row
    pub async fn find(&self, id: &Uuid) -> ApiResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

        Ok(booking)
    }
}
