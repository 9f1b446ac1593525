use super::*;

/// Tests unenrolling removes the enrollment and its recorded progress.
///
/// Expected: Ok with no enrollment and no completed-module rows left
#[tokio::test]
async fn removes_enrollment_and_progress() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let (course, modules) =
        factory::helpers::create_course_with_modules(db, admin.id, 0, 2).await?;
    let enrollment = factory::create_enrollment(db, learner.id, course.id).await?;
    factory::enrollment::complete_module(db, enrollment.id, modules[0].id).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    service.unenroll(&learner, course.id).await?;

    assert_eq!(entity::prelude::Enrollment::find().count(db).await?, 0);
    assert_eq!(entity::prelude::EnrollmentModule::find().count(db).await?, 0);

    Ok(())
}

/// Tests unenrolling from a course the learner never joined.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn not_enrolled_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let course = factory::create_course(db, admin.id).await?;

    let gateway = FakeGateway::new();
    let mailer = RecordingMailer::default();
    let service = EnrollmentService::new(db, &gateway, &mailer, CURRENCY);

    let result = service.unenroll(&learner, course.id).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
