//! Payout settlement scenario tests
//!
//! Database-backed tests are `#[ignore]`d and expect a migrated Postgres
//! database reachable via `TEST_DATABASE_URL`.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sqlx::PgPool;
    use uuid::Uuid;

    use utsavhub_backend::booking::{
        BookingService, BookingStatus, CreateBookingRequest, UpdateBookingStatusRequest,
    };
    use utsavhub_backend::error::ApiError;
    use utsavhub_backend::models::UserRole;
    use utsavhub_backend::payout::{
        BankDetails, ListPayoutsQuery, PaymentMethod, PayoutService, PayoutStatus,
        RequestPayoutRequest, UpdatePayoutStatusRequest,
    };

    async fn setup_test_db() -> PgPool {
        let database_url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/utsavhub_test".to_string());

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    async fn create_test_user(pool: &PgPool, role: UserRole) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, phone, password_hash, role, business_name)
            VALUES ($1, $2, $3, $4, 'not-a-real-hash', $5, $6)
            "#,
        )
        .bind(id)
        .bind(format!("Test {}", role.as_str()))
        .bind(format!("{}@test.example", id))
        .bind("+91-9000000000")
        .bind(role)
        .bind(match role {
            UserRole::Vendor => Some("Test Decorators"),
            _ => None,
        })
        .execute(pool)
        .await
        .expect("Failed to insert test user");
        id
    }

    /// Drive a fresh booking through confirm and complete so a payout can
    /// be requested against it.
    async fn completed_booking(
        booking_service: &BookingService,
        guest: Uuid,
        vendor: Uuid,
        total_price: f64,
    ) -> Uuid {
        let booking = booking_service
            .create(
                guest,
                CreateBookingRequest {
                    vendor_id: vendor,
                    service_type: "photographer".to_string(),
                    service_id: "studio-7".to_string(),
                    event_name: "Iyer Sangeet".to_string(),
                    event_date: NaiveDate::from_ymd_opt(2027, 1, 30).unwrap(),
                    event_time: "17:30".to_string(),
                    guest_count: 120,
                    venue: "Palm Court".to_string(),
                    venue_address: "4 Residency Road, Bengaluru".to_string(),
                    contact_person: "Anand Iyer".to_string(),
                    contact_phone: "+91-9876501234".to_string(),
                    contact_email: None,
                    special_requests: None,
                },
            )
            .await
            .unwrap();

        booking_service
            .update_status(
                &booking.id,
                vendor,
                UpdateBookingStatusRequest {
                    status: BookingStatus::Confirmed,
                    vendor_notes: None,
                    rejection_reason: None,
                    total_price: Some(total_price),
                },
            )
            .await
            .unwrap();

        booking_service
            .update_status(
                &booking.id,
                vendor,
                UpdateBookingStatusRequest {
                    status: BookingStatus::Completed,
                    vendor_notes: None,
                    rejection_reason: None,
                    total_price: None,
                },
            )
            .await
            .unwrap();

        booking.id
    }

    fn payout_request(booking_id: Uuid) -> RequestPayoutRequest {
        RequestPayoutRequest {
            booking_id,
            payment_method: Some(PaymentMethod::BankTransfer),
            bank_details: BankDetails {
                account_holder: Some("Test Decorators".to_string()),
                account_number: Some("001122334455".to_string()),
                ifsc_code: Some("HDFC0001234".to_string()),
                bank_name: Some("HDFC Bank".to_string()),
                upi_id: None,
            },
        }
    }

    // Scenario A: confirm at 50000, complete, request payout; expect the
    // 10% commission split snapshotted onto the payout.
    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_commission_split_on_request() {
        let pool = setup_test_db().await;
        let booking_service = BookingService::new(pool.clone());
        let payout_service = PayoutService::new(pool.clone(), 10.0);

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let booking_id = completed_booking(&booking_service, guest, vendor, 50000.0).await;

        let payout = payout_service
            .request(vendor, payout_request(booking_id))
            .await
            .expect("Payout request should succeed");

        assert_eq!(payout.status, PayoutStatus::Pending);
        assert_eq!(payout.amount, 50000.0);
        assert_eq!(payout.commission_rate, 10.0);
        assert_eq!(payout.commission_amount, 5000.0);
        assert_eq!(payout.net_amount, 45000.0);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_request_rejected_unless_booking_completed() {
        let pool = setup_test_db().await;
        let booking_service = BookingService::new(pool.clone());
        let payout_service = PayoutService::new(pool.clone(), 10.0);

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;

        let booking = booking_service
            .create(
                guest,
                CreateBookingRequest {
                    vendor_id: vendor,
                    service_type: "caterer".to_string(),
                    service_id: "kitchen-3".to_string(),
                    event_name: "Khan Walima".to_string(),
                    event_date: NaiveDate::from_ymd_opt(2027, 3, 2).unwrap(),
                    event_time: "20:00".to_string(),
                    guest_count: 200,
                    venue: "Crescent Hall".to_string(),
                    venue_address: "19 Park Street, Kolkata".to_string(),
                    contact_person: "Sana Khan".to_string(),
                    contact_phone: "+91-9830012345".to_string(),
                    contact_email: None,
                    special_requests: None,
                },
            )
            .await
            .unwrap();

        let result = payout_service.request(vendor, payout_request(booking.id)).await;
        assert!(matches!(result, Err(ApiError::InvalidTransition(_))));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_request_forbidden_for_other_vendor() {
        let pool = setup_test_db().await;
        let booking_service = BookingService::new(pool.clone());
        let payout_service = PayoutService::new(pool.clone(), 10.0);

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let other_vendor = create_test_user(&pool, UserRole::Vendor).await;
        let booking_id = completed_booking(&booking_service, guest, vendor, 30000.0).await;

        let result = payout_service
            .request(other_vendor, payout_request(booking_id))
            .await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    // Scenario D: a second payout request for the same booking conflicts and
    // the first payout is unchanged.
    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_duplicate_request_conflicts() {
        let pool = setup_test_db().await;
        let booking_service = BookingService::new(pool.clone());
        let payout_service = PayoutService::new(pool.clone(), 10.0);

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let booking_id = completed_booking(&booking_service, guest, vendor, 20000.0).await;

        let first = payout_service
            .request(vendor, payout_request(booking_id))
            .await
            .unwrap();

        let second = payout_service.request(vendor, payout_request(booking_id)).await;
        assert!(matches!(second, Err(ApiError::Conflict(_))));

        let unchanged = payout_service.details(&first.id).await.unwrap();
        assert_eq!(unchanged.status, PayoutStatus::Pending);
        assert_eq!(unchanged.amount, 20000.0);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_admin_settlement_flow() {
        let pool = setup_test_db().await;
        let booking_service = BookingService::new(pool.clone());
        let payout_service = PayoutService::new(pool.clone(), 10.0);

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let admin = create_test_user(&pool, UserRole::Admin).await;
        let booking_id = completed_booking(&booking_service, guest, vendor, 40000.0).await;

        let payout = payout_service
            .request(vendor, payout_request(booking_id))
            .await
            .unwrap();

        // pending -> completed directly is rejected
        let skip = payout_service
            .update_status(
                &payout.id,
                admin,
                UpdatePayoutStatusRequest {
                    status: PayoutStatus::Completed,
                    transaction_id: Some("TXN-1".to_string()),
                    notes: None,
                },
            )
            .await;
        assert!(matches!(skip, Err(ApiError::InvalidTransition(_))));

        let processing = payout_service
            .update_status(
                &payout.id,
                admin,
                UpdatePayoutStatusRequest {
                    status: PayoutStatus::Processing,
                    transaction_id: None,
                    notes: Some("NEFT initiated".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(processing.status, PayoutStatus::Processing);
        assert!(processing.processed_at.is_some());
        assert_eq!(processing.processed_by, Some(admin));

        let completed = payout_service
            .update_status(
                &payout.id,
                admin,
                UpdatePayoutStatusRequest {
                    status: PayoutStatus::Completed,
                    transaction_id: Some("TXN-88421".to_string()),
                    notes: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(completed.status, PayoutStatus::Completed);
        assert!(completed.completed_at.is_some());
        assert_eq!(completed.transaction_id.as_deref(), Some("TXN-88421"));

        // completed is terminal
        let reopen = payout_service
            .update_status(
                &payout.id,
                admin,
                UpdatePayoutStatusRequest {
                    status: PayoutStatus::Processing,
                    transaction_id: None,
                    notes: None,
                },
            )
            .await;
        assert!(matches!(reopen, Err(ApiError::InvalidTransition(_))));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_stats_and_filters() {
        let pool = setup_test_db().await;
        let booking_service = BookingService::new(pool.clone());
        let payout_service = PayoutService::new(pool.clone(), 10.0);

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let admin = create_test_user(&pool, UserRole::Admin).await;

        let b1 = completed_booking(&booking_service, guest, vendor, 10000.0).await;
        let b2 = completed_booking(&booking_service, guest, vendor, 25000.0).await;

        let p1 = payout_service.request(vendor, payout_request(b1)).await.unwrap();
        payout_service.request(vendor, payout_request(b2)).await.unwrap();

        payout_service
            .update_status(
                &p1.id,
                admin,
                UpdatePayoutStatusRequest {
                    status: PayoutStatus::Processing,
                    transaction_id: None,
                    notes: None,
                },
            )
            .await
            .unwrap();
        payout_service
            .update_status(
                &p1.id,
                admin,
                UpdatePayoutStatusRequest {
                    status: PayoutStatus::Completed,
                    transaction_id: Some("TXN-2".to_string()),
                    notes: None,
                },
            )
            .await
            .unwrap();

        let vendor_payouts = payout_service.list_for_vendor(vendor).await.unwrap();
        assert_eq!(vendor_payouts.len(), 2);

        let pending_only = payout_service
            .list_all(ListPayoutsQuery {
                status: Some(PayoutStatus::Pending),
                vendor: Some(vendor),
            })
            .await
            .unwrap();
        assert_eq!(pending_only.len(), 1);

        let stats = payout_service.stats().await.unwrap();
        assert!(stats.total >= 2);
        assert!(stats.completed >= 1);
        // paid amount only counts settled payouts' net value
        assert!(stats.paid_amount >= 9000.0);
        assert!(stats.total_amount >= 35000.0);
        assert!(
            (stats.total_amount - stats.total_commission - stats.total_net_amount).abs() < 1e-6
        );
    }
}
