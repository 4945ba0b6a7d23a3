//! Booking lifecycle scenario tests
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

    /// Helper to create a test database pool
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

    /// Insert a user row directly, bypassing the auth service
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
            UserRole::Vendor => Some("Test Caterers"),
            _ => None,
        })
        .execute(pool)
        .await
        .expect("Failed to insert test user");
        id
    }

    fn create_test_request(vendor_id: Uuid) -> CreateBookingRequest {
        CreateBookingRequest {
            vendor_id,
            service_type: "banquet-hall".to_string(),
            service_id: "hall-42".to_string(),
            event_name: "Sharma Reception".to_string(),
            event_date: NaiveDate::from_ymd_opt(2027, 2, 14).unwrap(),
            event_time: "19:00".to_string(),
            guest_count: 300,
            venue: "Lotus Lawns".to_string(),
            venue_address: "8 Link Road, Mumbai".to_string(),
            contact_person: "Priya Sharma".to_string(),
            contact_phone: "+91-9812345678".to_string(),
            contact_email: Some("priya@example.com".to_string()),
            special_requests: Some("Jain menu for 40 guests".to_string()),
        }
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_create_and_confirm_booking() {
        let pool = setup_test_db().await;
        let service = BookingService::new(pool.clone());

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;

        let booking = service
            .create(guest, create_test_request(vendor))
            .await
            .expect("Booking creation should succeed");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, 0.0);
        assert_eq!(booking.vendor_business_name.as_deref(), Some("Test Caterers"));

        let confirmed = service
            .update_status(
                &booking.id,
                vendor,
                UpdateBookingStatusRequest {
                    status: BookingStatus::Confirmed,
                    vendor_notes: Some("Looking forward to it".to_string()),
                    rejection_reason: None,
                    total_price: Some(50000.0),
                },
            )
            .await
            .expect("Confirmation should succeed");

        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.total_price, 50000.0);
        assert!(confirmed.confirmed_at.is_some());
        assert!(confirmed.cancelled_at.is_none());
        assert!(confirmed.completed_at.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_create_fails_for_unknown_vendor() {
        let pool = setup_test_db().await;
        let service = BookingService::new(pool.clone());

        let guest = create_test_user(&pool, UserRole::Guest).await;

        let result = service.create(guest, create_test_request(Uuid::new_v4())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_rejection_requires_reason() {
        let pool = setup_test_db().await;
        let service = BookingService::new(pool.clone());

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let booking = service.create(guest, create_test_request(vendor)).await.unwrap();

        let no_reason = service
            .update_status(
                &booking.id,
                vendor,
                UpdateBookingStatusRequest {
                    status: BookingStatus::Rejected,
                    vendor_notes: None,
                    rejection_reason: None,
                    total_price: None,
                },
            )
            .await;
        assert!(matches!(no_reason, Err(ApiError::ValidationError(_))));

        let rejected = service
            .update_status(
                &booking.id,
                vendor,
                UpdateBookingStatusRequest {
                    status: BookingStatus::Rejected,
                    vendor_notes: None,
                    rejection_reason: Some("Date already booked".to_string()),
                    total_price: None,
                },
            )
            .await
            .expect("Rejection with a reason should succeed");

        assert_eq!(rejected.status, BookingStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Date already booked"));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_transition_table_rejects_pending_to_completed() {
        let pool = setup_test_db().await;
        let service = BookingService::new(pool.clone());

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let booking = service.create(guest, create_test_request(vendor)).await.unwrap();

        let result = service
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
            .await;
        assert!(matches!(result, Err(ApiError::InvalidTransition(_))));
    }

    // Scenario B: guest cancels a pending booking, second cancel fails.
    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_guest_cancel_then_repeat_fails() {
        let pool = setup_test_db().await;
        let service = BookingService::new(pool.clone());

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let booking = service.create(guest, create_test_request(vendor)).await.unwrap();

        let cancelled = service.cancel(&booking.id, guest).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert!(cancelled.cancelled_at.is_some());

        let again = service.cancel(&booking.id, guest).await;
        assert!(matches!(again, Err(ApiError::InvalidTransition(_))));
    }

    // Scenario C: a vendor who does not own the booking gets Forbidden and
    // nothing is mutated.
    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_non_owner_vendor_is_forbidden() {
        let pool = setup_test_db().await;
        let service = BookingService::new(pool.clone());

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let other_vendor = create_test_user(&pool, UserRole::Vendor).await;
        let booking = service.create(guest, create_test_request(vendor)).await.unwrap();

        let result = service
            .update_status(
                &booking.id,
                other_vendor,
                UpdateBookingStatusRequest {
                    status: BookingStatus::Confirmed,
                    vendor_notes: None,
                    rejection_reason: None,
                    total_price: Some(99999.0),
                },
            )
            .await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        let unchanged = service.details(&booking.id).await.unwrap();
        assert_eq!(unchanged.status, BookingStatus::Pending);
        assert_eq!(unchanged.total_price, 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_get_requires_participant() {
        let pool = setup_test_db().await;
        let service = BookingService::new(pool.clone());

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;
        let stranger = create_test_user(&pool, UserRole::Guest).await;
        let booking = service.create(guest, create_test_request(vendor)).await.unwrap();

        assert!(service.get(&booking.id, guest).await.is_ok());
        assert!(service.get(&booking.id, vendor).await.is_ok());
        assert!(matches!(
            service.get(&booking.id, stranger).await,
            Err(ApiError::Forbidden(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_vendor_stats_totals() {
        let pool = setup_test_db().await;
        let service = BookingService::new(pool.clone());

        let guest = create_test_user(&pool, UserRole::Guest).await;
        let vendor = create_test_user(&pool, UserRole::Vendor).await;

        for _ in 0..3 {
            service.create(guest, create_test_request(vendor)).await.unwrap();
        }
        let to_cancel = service.create(guest, create_test_request(vendor)).await.unwrap();
        service.cancel(&to_cancel.id, guest).await.unwrap();

        let stats = service.vendor_stats(vendor).await.unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 3);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(
            stats.total,
            stats.pending + stats.confirmed + stats.rejected + stats.cancelled + stats.completed
        );
    }
}
