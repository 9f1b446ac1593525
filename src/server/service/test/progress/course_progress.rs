use super::*;

/// Tests progress through a course with no modules.
///
/// Expected: Ok with 0 percent
#[tokio::test]
async fn empty_course_is_zero_percent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let course = factory::create_course(db, admin.id).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;

    let progress = ProgressService::new(db)
        .course_progress(&learner, course.id)
        .await?;

    assert_eq!(progress.total, 0);
    assert_eq!(progress.percentage(), 0);

    Ok(())
}

/// Tests progress after completing one of three modules.
///
/// Expected: Ok with 33 percent, then 67 after a second module
#[tokio::test]
async fn rounds_to_whole_percent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let (course, modules) = create_course_with_modules(db, admin.id, 0, 3).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;

    let service = ProgressService::new(db);

    service.mark_module_complete(&learner, modules[0].id).await?;
    let progress = service.course_progress(&learner, course.id).await?;
    assert_eq!((progress.completed, progress.total), (1, 3));
    assert_eq!(progress.percentage(), 33);

    service.mark_module_complete(&learner, modules[2].id).await?;
    let progress = service.course_progress(&learner, course.id).await?;
    assert_eq!(progress.percentage(), 67);

    Ok(())
}

/// Tests progress for a learner who is not enrolled.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn not_enrolled_is_forbidden() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let course = factory::create_course(db, admin.id).await?;

    let result = ProgressService::new(db)
        .course_progress(&learner, course.id)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
