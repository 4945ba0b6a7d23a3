//! Payout models and data structures

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

/// Payout settlement states
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "payout_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,    // Requested by vendor, awaiting admin
    Processing, // Admin picked it up
    Completed,  // Settled, terminal
    Failed,     // Settlement failed, terminal
    Cancelled,  // Withdrawn administratively, terminal
}

impl PayoutStatus {
    /// Targets an admin may move a payout to from this state.
    ///
    /// `completed`, `failed` and `cancelled` are terminal: a settled payout
    /// record is immutable.
    pub fn allowed_transitions(&self) -> &'static [PayoutStatus] {
        match self {
            PayoutStatus::Pending => &[PayoutStatus::Processing, PayoutStatus::Cancelled],
            PayoutStatus::Processing => &[
                PayoutStatus::Completed,
                PayoutStatus::Failed,
                PayoutStatus::Cancelled,
            ],
            PayoutStatus::Completed | PayoutStatus::Failed | PayoutStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: PayoutStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Completed => "completed",
            PayoutStatus::Failed => "failed",
            PayoutStatus::Cancelled => "cancelled",
        }
    }
}

/// How the vendor wants to be paid
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "payment_method", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    BankTransfer,
    Upi,
    Cheque,
    Cash,
}

/// Commission split snapshotted onto a payout at request time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionSplit {
    pub amount: f64,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub net_amount: f64,
}

impl CommissionSplit {
    /// Split `amount` at `rate` percent platform commission.
    pub fn compute(amount: f64, rate: f64) -> Self {
        let commission_amount = amount * rate / 100.0;
        Self {
            amount,
            commission_rate: rate,
            commission_amount,
            net_amount: amount - commission_amount,
        }
    }
}

/// Payout model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub booking_id: Uuid,
    pub amount: f64,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub net_amount: f64,
    pub status: PayoutStatus,
    pub payment_method: PaymentMethod,
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub bank_name: Option<String>,
    pub upi_id: Option<String>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub processed_by: Option<Uuid>,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payout joined with vendor, booking and processing-admin summaries
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDetails {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub booking_id: Uuid,
    pub amount: f64,
    pub commission_rate: f64,
    pub commission_amount: f64,
    pub net_amount: f64,
    pub status: PayoutStatus,
    pub payment_method: PaymentMethod,
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub bank_name: Option<String>,
    pub upi_id: Option<String>,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub processed_by: Option<Uuid>,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Vendor summary
    pub vendor_name: String,
    pub vendor_email: String,
    pub vendor_business_name: Option<String>,

    // Booking summary
    pub event_name: String,
    pub event_date: chrono::NaiveDate,

    // Processing admin summary
    pub processed_by_name: Option<String>,
}

/// Bank details supplied with a payout request
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub bank_name: Option<String>,
    pub upi_id: Option<String>,
}

/// Request DTO for a vendor payout request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayoutRequest {
    pub booking_id: Uuid,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub bank_details: BankDetails,
}

/// Request DTO for the admin status update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayoutStatusRequest {
    pub status: PayoutStatus,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for the admin payout listing
#[derive(Debug, Deserialize)]
pub struct ListPayoutsQuery {
    pub status: Option<PayoutStatus>,
    pub vendor: Option<Uuid>,
}

/// Platform-wide payout statistics
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PayoutStats {
    pub total: i64,
    pub pending: i64,
    pub processing: i64,
    pub completed: i64,
    pub failed: i64,
    pub cancelled: i64,
    pub total_amount: f64,
    pub total_commission: f64,
    pub total_net_amount: f64,
    /// Sum of `net_amount` over completed payouts only
    pub paid_amount: f64,
}
