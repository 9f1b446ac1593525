use super::*;

/// Tests deleting an enrollment that has completed modules.
///
/// Verifies that the completed-module rows go with it so the foreign key does not block
/// the delete.
///
/// Expected: Ok(1) and no completion rows remain
#[tokio::test]
async fn removes_completions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let user = factory::create_user(db).await?;
    let (course, modules) = create_course_with_modules(db, admin.id, 0, 2).await?;
    let enrollment = factory::create_enrollment(db, user.id, course.id).await?;
    factory::enrollment::complete_module(db, enrollment.id, modules[0].id).await?;

    let repo = EnrollmentRepository::new(db);
    assert_eq!(repo.delete(enrollment.id).await?, 1);

    assert!(repo.find_by_id(enrollment.id).await?.is_none());
    assert_eq!(
        entity::prelude::EnrollmentModule::find().count(db).await?,
        0
    );

    Ok(())
}

/// Tests removing every enrollment of one learner.
///
/// Expected: Ok(2) and the other learner keeps their enrollment
#[tokio::test]
async fn delete_by_user_keeps_other_learners() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let course = factory::create_course(db, admin.id).await?;
    let other_course = factory::create_course(db, admin.id).await?;
    factory::create_enrollment(db, user.id, course.id).await?;
    factory::create_enrollment(db, user.id, other_course.id).await?;
    factory::create_enrollment(db, other.id, course.id).await?;

    let repo = EnrollmentRepository::new(db);
    assert_eq!(repo.delete_by_user(user.id).await?, 2);
    assert_eq!(repo.count_by_user(user.id).await?, 0);
    assert_eq!(repo.count_by_user(other.id).await?, 1);

    Ok(())
}
