use super::*;
use chrono::Duration;

/// Tests the reconciliation sweep.
///
/// Verifies that stale pending payments are re-verified and settled together with their
/// enrollments, while payments the gateway still reports in flight stay pending.
///
/// Expected: Ok(1) with one payment settled and one still pending
#[tokio::test]
async fn settles_stale_payments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = factory::create_user(db).await?;
    let course = factory::course::create_paid_course(db, admin.id, 5000).await?;
    EnrollmentFactory::new(db, learner.id, course.id)
        .pending("ref_stale_paid")
        .build()
        .await?;
    PaymentFactory::new(db, learner.id)
        .reference("ref_stale_paid")
        .course(course.id)
        .build()
        .await?;
    PaymentFactory::new(db, learner.id)
        .reference("ref_stale_open")
        .build()
        .await?;

    let gateway = FakeGateway::new();
    gateway.set_status("ref_stale_paid", GatewayStatus::Success);
    gateway.set_status("ref_stale_open", GatewayStatus::Pending);
    let mailer = RecordingMailer::default();
    let service = PaymentService::new(db, &gateway, &mailer, CURRENCY);

    // Negative age makes every pending payment stale
    let settled = service.reconcile_pending(Duration::minutes(-1)).await?;

    assert_eq!(settled, 1);
    assert_eq!(
        payment_status(db, "ref_stale_paid").await?,
        PaymentStatus::Success
    );
    assert_eq!(
        enrollment_status(db, "ref_stale_paid").await?,
        EnrollmentStatus::Completed
    );
    assert_eq!(
        payment_status(db, "ref_stale_open").await?,
        PaymentStatus::Pending
    );

    Ok(())
}

/// Tests that fresh pending payments are left alone.
///
/// Expected: Ok(0) without gateway calls
#[tokio::test]
async fn skips_recent_payments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    factory::create_payment(db, learner.id).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = PaymentService::new(db, &gateway, &mailer, CURRENCY);

    let settled = service.reconcile_pending(Duration::minutes(30)).await?;

    assert_eq!(settled, 0);
    assert_eq!(gateway.verify_count(), 0);

    Ok(())
}
