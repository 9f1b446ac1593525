use super::*;

/// Tests listing a course's roster as an admin who does not own the course.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn roster_is_owner_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = User::from_entity(factory::create_admin(db).await?);
    let other_admin = User::from_entity(factory::create_admin(db).await?);
    let learner = factory::create_user(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let roster = service.course_enrollments(&owner, course.id).await?;
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].user.id, learner.id);

    let denied = service.course_enrollments(&other_admin, course.id).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that admin listings only cover the admin's own courses.
///
/// Expected: Ok with enrollments of owned courses only
#[tokio::test]
async fn admin_listing_is_scoped_to_owned_courses() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let other_admin = factory::create_admin(db).await?;
    let learner = factory::create_user(db).await?;
    let mine = factory::create_course(db, admin.id).await?;
    let theirs = factory::create_course(db, other_admin.id).await?;
    factory::create_enrollment(db, learner.id, mine.id).await?;
    factory::create_enrollment(db, learner.id, theirs.id).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let enrollments = service.admin_enrollments(&admin).await?;

    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].course.id, mine.id);

    Ok(())
}

/// Tests deleting a learner's enrollment as the course owner.
///
/// Expected: Ok with the enrollment removed
#[tokio::test]
async fn owner_deletes_enrollment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = User::from_entity(factory::create_admin(db).await?);
    let learner = factory::create_user(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    let enrollment = factory::create_enrollment(db, learner.id, course.id).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    service.delete_enrollment(&owner, enrollment.id).await?;

    let remaining = entity::prelude::Enrollment::find_by_id(enrollment.id)
        .one(db)
        .await?;
    assert!(remaining.is_none());

    Ok(())
}

/// Tests announcing to a course.
///
/// Verifies that only learners with a completed enrollment are addressed.
///
/// Expected: Ok((1, 1)) with one email to the paying learner
#[tokio::test]
async fn announcement_reaches_completed_learners() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = User::from_entity(factory::create_admin(db).await?);
    let paid = factory::create_user(db).await?;
    let pending = factory::create_user(db).await?;
    let course = factory::course::create_paid_course(db, owner.id, 5000).await?;
    factory::create_enrollment(db, paid.id, course.id).await?;
    EnrollmentFactory::new(db, pending.id, course.id)
        .pending("ref_pending")
        .build()
        .await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let (recipients, delivered) = service
        .notify_course(&owner, course.id, "Live session", "Join us on Friday")
        .await?;

    assert_eq!((recipients, delivered), (1, 1));
    assert_eq!(mailer.sent_to(&paid.email).len(), 1);
    assert!(mailer.sent_to(&pending.email).is_empty());

    Ok(())
}

/// Tests that a failing mailer does not fail the announcement.
///
/// Expected: Ok((1, 0))
#[tokio::test]
async fn announcement_survives_mail_failures() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = User::from_entity(factory::create_admin(db).await?);
    let learner = factory::create_user(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::failing();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let result = service
        .notify_course(&owner, course.id, "Update", "New module available")
        .await?;

    assert_eq!(result, (1, 0));

    Ok(())
}
