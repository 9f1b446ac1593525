use super::*;

/// Tests the two-course checkout scenario end to end.
///
/// A learner enrolls in a free course C1 and a paid course C2 (5000). The gateway reports
/// success for C2's reference. Verifying twice completes C2 once, contacts the gateway
/// once and sends exactly one confirmation for C2.
///
/// Expected: both enrollments completed, one C2 confirmation email
#[tokio::test]
async fn free_and_paid_courses_settle_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let c1 = factory::course::CourseFactory::new(db, admin.id)
        .title("C1")
        .build()
        .await?;
    let c2 = factory::course::CourseFactory::new(db, admin.id)
        .title("C2")
        .price(5000)
        .build()
        .await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let free = service.enroll(&learner, c1.id).await?;
    assert_eq!(free.enrollment.payment_status, EnrollmentStatus::Completed);

    let paid = service.enroll(&learner, c2.id).await?;
    let reference = paid.checkout.unwrap().reference;
    gateway.set_status(&reference, GatewayStatus::Success);

    let first = service.complete_after_payment(learner.id, &reference).await?;
    let second = service.complete_after_payment(learner.id, &reference).await?;

    assert_eq!(first.status, EnrollmentStatus::Completed);
    assert!(first.newly_settled);
    assert_eq!(second.status, EnrollmentStatus::Completed);
    assert!(!second.newly_settled);
    assert!(second.enrollment.enrolled_at.is_some());
    assert_eq!(gateway.verify_count(), 1);

    let c2_confirmations = mailer
        .sent_to(&learner.email)
        .into_iter()
        .filter(|email| email.subject.contains("C2"))
        .count();
    assert_eq!(c2_confirmations, 1);

    let payment = entity::prelude::Payment::find()
        .filter(entity::payment::Column::Reference.eq(&reference))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Success);
    assert!(payment.paid_at.is_some());

    Ok(())
}

/// Tests a declined payment.
///
/// Expected: Ok with enrollment and payment failed, no confirmation email
#[tokio::test]
async fn declined_payment_fails_enrollment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let course = factory::course::create_paid_course(db, admin.id, 5000).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let reference = service
        .enroll(&learner, course.id)
        .await?
        .checkout
        .unwrap()
        .reference;
    gateway.set_status(&reference, GatewayStatus::Failed);

    let settlement = service.complete_after_payment(learner.id, &reference).await?;

    assert_eq!(settlement.status, EnrollmentStatus::Failed);
    assert!(settlement.enrollment.enrolled_at.is_none());
    assert!(mailer.sent().is_empty());

    let payment = entity::prelude::Payment::find()
        .filter(entity::payment::Column::Reference.eq(&reference))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Failed);

    Ok(())
}

/// Tests verifying while the gateway still reports the charge in flight.
///
/// Expected: Ok with enrollment still pending, payment untouched
#[tokio::test]
async fn in_flight_payment_stays_pending() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let course = factory::course::create_paid_course(db, admin.id, 5000).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let reference = service
        .enroll(&learner, course.id)
        .await?
        .checkout
        .unwrap()
        .reference;
    gateway.set_status(&reference, GatewayStatus::Pending);

    let settlement = service.complete_after_payment(learner.id, &reference).await?;

    assert_eq!(settlement.status, EnrollmentStatus::Pending);
    assert!(!settlement.newly_settled);

    let payment = entity::prelude::Payment::find()
        .filter(entity::payment::Column::Reference.eq(&reference))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);

    Ok(())
}

/// Tests verifying a reference that belongs to another learner.
///
/// Expected: Err(NotFound) and no gateway call
#[tokio::test]
async fn other_users_reference_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let owner = factory::create_user(db).await?;
    let intruder = factory::create_user(db).await?;
    let course = factory::course::create_paid_course(db, admin.id, 5000).await?;
    EnrollmentFactory::new(db, owner.id, course.id)
        .pending("ref_owner")
        .build()
        .await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let result = service.complete_after_payment(intruder.id, "ref_owner").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(gateway.verify_count(), 0);

    Ok(())
}
