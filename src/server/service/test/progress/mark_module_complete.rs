use super::*;

/// Tests completing a module with a pending (unpaid) enrollment.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn pending_enrollment_is_forbidden() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let (course, modules) = create_course_with_modules(db, admin.id, 5000, 1).await?;
    EnrollmentFactory::new(db, learner.id, course.id)
        .pending("ref_unpaid")
        .build()
        .await?;

    let result = ProgressService::new(db)
        .mark_module_complete(&learner, modules[0].id)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests completing the same module twice.
///
/// Expected: Ok on the first call, Err(Conflict) on the second
#[tokio::test]
async fn second_completion_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let (course, modules) = create_course_with_modules(db, admin.id, 5000, 2).await?;
    let enrollment = factory::create_enrollment(db, learner.id, course.id).await?;

    let service = ProgressService::new(db);

    let completion = service.mark_module_complete(&learner, modules[0].id).await?;
    assert_eq!(completion.enrollment_id, enrollment.id);
    assert_eq!(completion.module_id, modules[0].id);

    let again = service.mark_module_complete(&learner, modules[0].id).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests completing a module that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_module_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = User::from_entity(factory::create_user(db).await?);

    let result = ProgressService::new(db)
        .mark_module_complete(&learner, 4040)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
