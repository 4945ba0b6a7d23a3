//! Payout service layer - business logic for payout settlement

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::booking::BookingStatus;
use crate::error::{unique_violation_to_conflict, ApiError, ApiResult};
use crate::payout::{
    CommissionSplit, ListPayoutsQuery, PaymentMethod, Payout, PayoutDetails, PayoutStats,
    PayoutStatus, RequestPayoutRequest, UpdatePayoutStatusRequest,
};

const DUPLICATE_PAYOUT: &str = "Payout request already exists for this booking";

const DETAILS_SELECT: &str = r#"
    SELECT
        p.*,
        v.name AS vendor_name,
        v.email AS vendor_email,
        v.business_name AS vendor_business_name,
        b.event_name,
        b.event_date,
        a.name AS processed_by_name
    FROM payouts p
    JOIN users v ON p.vendor_id = v.id
    JOIN bookings b ON p.booking_id = b.id
    LEFT JOIN users a ON p.processed_by = a.id
"#;

/// Payout service managing commission settlement for completed bookings
#[derive(Clone)]
pub struct PayoutService {
    db_pool: PgPool,
    commission_rate_percent: f64,
}

impl PayoutService {
    pub fn new(db_pool: PgPool, commission_rate_percent: f64) -> Self {
        Self {
            db_pool,
            commission_rate_percent,
        }
    }

    /// Vendor requests settlement for a completed booking.
    ///
    /// The commission rate in force is snapshotted onto the record; later
    /// platform rate changes never touch existing payouts.
    pub async fn request(
        &self,
        vendor_id: Uuid,
        request: RequestPayoutRequest,
    ) -> ApiResult<PayoutDetails> {
        let booking = sqlx::query_as::<_, crate::booking::Booking>(
            "SELECT * FROM bookings WHERE id = $1",
        )
        .bind(request.booking_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

        if booking.vendor_id != vendor_id {
            return Err(ApiError::Forbidden(
                "Not authorized to request a payout for this booking".to_string(),
            ));
        }

        if booking.status != BookingStatus::Completed {
            return Err(ApiError::InvalidTransition(
                "Booking must be completed before requesting payout".to_string(),
            ));
        }

        // Friendly pre-check; the unique index on booking_id is what actually
        // closes the race between two concurrent requests.
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM payouts WHERE booking_id = $1",
        )
        .bind(request.booking_id)
        .fetch_one(&self.db_pool)
        .await?;

        if existing > 0 {
            return Err(ApiError::Conflict(DUPLICATE_PAYOUT.to_string()));
        }

        let split = CommissionSplit::compute(booking.total_price, self.commission_rate_percent);
        if split.amount == 0.0 {
            tracing::warn!(
                booking_id = %booking.id,
                "Payout requested for a booking with no total price; creating zero-value payout"
            );
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let bank = request.bank_details;

        sqlx::query(
            r#"
            INSERT INTO payouts (
                id, vendor_id, booking_id, amount, commission_rate,
                commission_amount, net_amount, status, payment_method,
                account_holder, account_number, ifsc_code, bank_name, upi_id,
                requested_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15, $15)
            "#,
        )
        .bind(id)
        .bind(vendor_id)
        .bind(request.booking_id)
        .bind(split.amount)
        .bind(split.commission_rate)
        .bind(split.commission_amount)
        .bind(split.net_amount)
        .bind(PayoutStatus::Pending)
        .bind(request.payment_method.unwrap_or(PaymentMethod::BankTransfer))
        .bind(&bank.account_holder)
        .bind(&bank.account_number)
        .bind(&bank.ifsc_code)
        .bind(&bank.bank_name)
        .bind(&bank.upi_id)
        .bind(now)
        .execute(&self.db_pool)
        .await
        .map_err(|e| unique_violation_to_conflict(e, DUPLICATE_PAYOUT))?;

        tracing::info!(
            payout_id = %id,
            booking_id = %request.booking_id,
            amount = split.amount,
            net_amount = split.net_amount,
            "Payout requested"
        );

        self.details(&id).await
    }

    /// Get a payout with vendor, booking and admin summaries joined in
    pub async fn details(&self, id: &Uuid) -> ApiResult<PayoutDetails> {
        let query = format!("{} WHERE p.id = $1", DETAILS_SELECT);
        let payout = sqlx::query_as::<_, PayoutDetails>(&query)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Payout not found".to_string()))?;

        Ok(payout)
    }

    /// Admin listing with optional status and vendor filters, newest first
    pub async fn list_all(&self, filter: ListPayoutsQuery) -> ApiResult<Vec<PayoutDetails>> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new(DETAILS_SELECT);
        query_builder.push(" WHERE 1=1");

        if let Some(status) = filter.status {
            query_builder.push(" AND p.status = ");
            query_builder.push_bind(status);
        }
        if let Some(vendor) = filter.vendor {
            query_builder.push(" AND p.vendor_id = ");
            query_builder.push_bind(vendor);
        }

        query_builder.push(" ORDER BY p.requested_at DESC");

        let payouts = query_builder
            .build_query_as::<PayoutDetails>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(payouts)
    }

    /// A vendor's own payouts with booking summaries, newest first
    pub async fn list_for_vendor(&self, vendor_id: Uuid) -> ApiResult<Vec<PayoutDetails>> {
        let query = format!(
            "{} WHERE p.vendor_id = $1 ORDER BY p.requested_at DESC",
            DETAILS_SELECT
        );
        let payouts = sqlx::query_as::<_, PayoutDetails>(&query)
            .bind(vendor_id)
            .fetch_all(&self.db_pool)
            .await?;

        Ok(payouts)
    }

    /// Admin-driven settlement transition
    pub async fn update_status(
        &self,
        id: &Uuid,
        admin_id: Uuid,
        request: UpdatePayoutStatusRequest,
    ) -> ApiResult<PayoutDetails> {
        let payout = self.find(id).await?;

        if !payout.status.can_transition_to(request.status) {
            return Err(ApiError::InvalidTransition(format!(
                "Cannot transition payout from {} to {}",
                payout.status.as_str(),
                request.status.as_str()
            )));
        }

        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE payouts SET
                status = $1,
                notes = COALESCE($2, notes),
                processed_by = $3,
                transaction_id = COALESCE($4, transaction_id),
                processed_at = CASE WHEN $1 = 'processing'::payout_status
                                    THEN $5 ELSE processed_at END,
                completed_at = CASE WHEN $1 = 'completed'::payout_status
                                    THEN $5 ELSE completed_at END,
                updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(request.status)
        .bind(&request.notes)
        .bind(admin_id)
        .bind(&request.transaction_id)
        .bind(now)
        .bind(id)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(
            payout_id = %id,
            from = %payout.status.as_str(),
            to = %request.status.as_str(),
            admin_id = %admin_id,
            "Payout status updated"
        );

        self.details(id).await
    }

    /// Counts per status plus monetary aggregates, in a single query
    pub async fn stats(&self) -> ApiResult<PayoutStats> {
        let stats = sqlx::query_as::<_, PayoutStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'processing') AS processing,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'failed') AS failed,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled,
                COALESCE(SUM(amount), 0) AS total_amount,
                COALESCE(SUM(commission_amount), 0) AS total_commission,
                COALESCE(SUM(net_amount), 0) AS total_net_amount,
                COALESCE(SUM(net_amount) FILTER (WHERE status = 'completed'), 0) AS paid_amount
            FROM payouts
            "#,
        )
        .fetch_one(&self.db_pool)
        .await?;

        Ok(stats)
    }

    /// Fetch the raw payout row
    pub async fn find(&self, id: &Uuid) -> ApiResult<Payout> {
        let payout = sqlx::query_as::<_, Payout>("SELECT * FROM payouts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Payout not found".to_string()))?;

        Ok(payout)
    }
}
