use super::*;

fn charge_success(reference: &str) -> Vec<u8> {
    json!({
        "event": "charge.success",
        "data": {
            "reference": reference,
            "status": "success",
            "channel": "card",
            "paid_at": "2026-10-01T12:00:00.000Z",
            "metadata": {"course_id": 1}
        }
    })
    .to_string()
    .into_bytes()
}

/// Tests a webhook delivery without the signature header.
///
/// Expected: Err(PaymentErr(InvalidSignature)) and the payment untouched
#[tokio::test]
async fn rejects_missing_signature() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    PaymentFactory::new(db, learner.id)
        .reference("ref_hook")
        .build()
        .await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = PaymentService::new(db, &gateway, &mailer, CURRENCY);

    let result = service
        .handle_webhook(SECRET, &charge_success("ref_hook"), None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::InvalidSignature))
    ));
    assert_eq!(payment_status(db, "ref_hook").await?, PaymentStatus::Pending);

    Ok(())
}

/// Tests a webhook signed with the wrong key.
///
/// Expected: Err(PaymentErr(InvalidSignature)) and the payment untouched
#[tokio::test]
async fn rejects_forged_signature() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    PaymentFactory::new(db, learner.id)
        .reference("ref_hook")
        .build()
        .await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = PaymentService::new(db, &gateway, &mailer, CURRENCY);

    let body = charge_success("ref_hook");
    let forged = sign("sk_attacker", &body);
    let result = service.handle_webhook(SECRET, &body, Some(&forged)).await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::InvalidSignature))
    ));
    assert_eq!(payment_status(db, "ref_hook").await?, PaymentStatus::Pending);

    Ok(())
}

/// Tests a genuine charge.success webhook for a course checkout.
///
/// Verifies that the payment and enrollment settle without a gateway round trip and that
/// a repeated delivery changes nothing and sends no second email.
///
/// Expected: Ok with payment success, enrollment completed, one confirmation
#[tokio::test]
async fn settles_payment_and_enrollment() -> Result<(), AppError> {
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
        .pending("ref_hook")
        .build()
        .await?;
    PaymentFactory::new(db, learner.id)
        .reference("ref_hook")
        .course(course.id)
        .build()
        .await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = PaymentService::new(db, &gateway, &mailer, CURRENCY);

    let body = charge_success("ref_hook");
    let signature = sign(SECRET, &body);
    service.handle_webhook(SECRET, &body, Some(&signature)).await?;
    service.handle_webhook(SECRET, &body, Some(&signature)).await?;

    assert_eq!(payment_status(db, "ref_hook").await?, PaymentStatus::Success);
    assert_eq!(
        enrollment_status(db, "ref_hook").await?,
        EnrollmentStatus::Completed
    );
    assert_eq!(gateway.verify_count(), 0);
    assert_eq!(mailer.sent_to(&learner.email).len(), 1);

    Ok(())
}

/// Tests a charge.success webhook whose transaction object omits `status`.
///
/// Verifies that the event type alone is taken as success and the checkout completes.
///
/// Expected: Ok with payment success and enrollment completed
#[tokio::test]
async fn charge_without_status_settles_as_success() -> Result<(), AppError> {
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
        .pending("ref_bare")
        .build()
        .await?;
    PaymentFactory::new(db, learner.id)
        .reference("ref_bare")
        .course(course.id)
        .build()
        .await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = PaymentService::new(db, &gateway, &mailer, CURRENCY);

    let body = json!({
        "event": "charge.success",
        "data": {"reference": "ref_bare", "channel": "card"}
    })
    .to_string()
    .into_bytes();
    service
        .handle_webhook(SECRET, &body, Some(&sign(SECRET, &body)))
        .await?;

    assert_eq!(payment_status(db, "ref_bare").await?, PaymentStatus::Success);
    assert_eq!(
        enrollment_status(db, "ref_bare").await?,
        EnrollmentStatus::Completed
    );

    Ok(())
}

/// Tests authentic events that carry nothing to settle.
///
/// Covers a non-charge event and a charge for an unknown reference.
///
/// Expected: Ok for both, payment untouched
#[tokio::test]
async fn acknowledges_irrelevant_events() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    PaymentFactory::new(db, learner.id)
        .reference("ref_hook")
        .build()
        .await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = PaymentService::new(db, &gateway, &mailer, CURRENCY);

    let transfer = json!({"event": "transfer.success", "data": {"reference": "ref_hook"}})
        .to_string()
        .into_bytes();
    service
        .handle_webhook(SECRET, &transfer, Some(&sign(SECRET, &transfer)))
        .await?;

    let unknown = charge_success("ref_unknown");
    service
        .handle_webhook(SECRET, &unknown, Some(&sign(SECRET, &unknown)))
        .await?;

    assert_eq!(payment_status(db, "ref_hook").await?, PaymentStatus::Pending);

    Ok(())
}

/// Tests an authentic body that is not JSON.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_malformed_body() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = PaymentService::new(db, &gateway, &mailer, CURRENCY);

    let body = b"not json".to_vec();
    let result = service
        .handle_webhook(SECRET, &body, Some(&sign(SECRET, &body)))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
