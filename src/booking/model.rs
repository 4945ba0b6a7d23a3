//! Booking models and data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Booking lifecycle states
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,   // Awaiting vendor response
    Confirmed, // Vendor accepted and priced the booking
    Rejected,  // Vendor declined, with reason
    Cancelled, // Withdrawn by guest or vendor
    Completed, // Service delivered, payout becomes possible
}

impl BookingStatus {
    /// Targets the vendor may move a booking to from this state.
    ///
    /// `rejected`, `cancelled` and `completed` are terminal; `completed`
    /// is only reachable after a confirmation.
    pub fn allowed_transitions(&self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[
                BookingStatus::Confirmed,
                BookingStatus::Rejected,
                BookingStatus::Cancelled,
            ],
            BookingStatus::Confirmed => &[BookingStatus::Completed, BookingStatus::Cancelled],
            BookingStatus::Rejected | BookingStatus::Cancelled | BookingStatus::Completed => &[],
        }
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Whether the guest may still withdraw the booking.
    pub fn guest_cancellable(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

/// Payment progress on a booking
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "payment_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Unpaid,
    AdvancePaid,
    FullyPaid,
}

/// Booking model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub vendor_id: Uuid,
    // Weak reference into an external listing collection: a category tag
    // plus an opaque id, resolved lazily by the owning listing service.
    pub service_type: String,
    pub service_id: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub guest_count: i32,
    pub venue: String,
    pub venue_address: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub total_price: f64,
    pub advance_payment: f64,
    pub payment_status: PaymentStatus,
    pub vendor_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking joined with guest and vendor display fields
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub vendor_id: Uuid,
    pub service_type: String,
    pub service_id: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub guest_count: i32,
    pub venue: String,
    pub venue_address: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub total_price: f64,
    pub advance_payment: f64,
    pub payment_status: PaymentStatus,
    pub vendor_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Guest summary
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,

    // Vendor summary
    pub vendor_name: String,
    pub vendor_email: String,
    pub vendor_phone: String,
    pub vendor_business_name: Option<String>,
}

/// Request DTO for creating a booking
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub vendor_id: Uuid,
    #[validate(length(min = 1, message = "is required"))]
    pub service_type: String,
    #[validate(length(min = 1, message = "is required"))]
    pub service_id: String,
    #[validate(length(min = 1, message = "is required"))]
    pub event_name: String,
    pub event_date: NaiveDate,
    #[validate(length(min = 1, message = "is required"))]
    pub event_time: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub guest_count: i32,
    #[validate(length(min = 1, message = "is required"))]
    pub venue: String,
    #[validate(length(min = 1, message = "is required"))]
    pub venue_address: String,
    #[validate(length(min = 1, message = "is required"))]
    pub contact_person: String,
    #[validate(length(min = 1, message = "is required"))]
    pub contact_phone: String,
    #[validate(email(message = "must be a valid email"))]
    pub contact_email: Option<String>,
    pub special_requests: Option<String>,
}

/// Request DTO for the vendor status update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    pub vendor_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub total_price: Option<f64>,
}

/// Per-vendor booking counts grouped by status
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct VendorBookingStats {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub rejected: i64,
    pub cancelled: i64,
    pub completed: i64,
}

impl VendorBookingStats {
    /// Fold `(status, count)` rows from a GROUP BY pass into the stats.
    pub fn from_rows(rows: &[(BookingStatus, i64)]) -> Self {
        let mut stats = VendorBookingStats::default();
        for (status, count) in rows {
            stats.total += count;
            match status {
                BookingStatus::Pending => stats.pending += count,
                BookingStatus::Confirmed => stats.confirmed += count,
                BookingStatus::Rejected => stats.rejected += count,
                BookingStatus::Cancelled => stats.cancelled += count,
                BookingStatus::Completed => stats.completed += count,
            }
        }
        stats
    }
}
