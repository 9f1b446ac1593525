use super::*;

/// Tests settling a pending enrollment.
///
/// Verifies that the transition out of pending succeeds once and stamps `enrolled_at`,
/// while a second settle attempt reports that another writer already moved it.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn transitions_only_from_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let user = factory::create_user(db).await?;
    let course = factory::create_course(db, admin.id).await?;
    let enrollment = EnrollmentFactory::new(db, user.id, course.id)
        .pending("ref_settle")
        .build()
        .await?;

    let repo = EnrollmentRepository::new(db);

    assert!(repo.settle(enrollment.id, EnrollmentStatus::Completed).await?);
    assert!(!repo.settle(enrollment.id, EnrollmentStatus::Failed).await?);

    let stored = repo.find_by_id(enrollment.id).await?.unwrap();
    assert_eq!(stored.payment_status, EnrollmentStatus::Completed);
    assert!(stored.enrolled_at.is_some());

    Ok(())
}

/// Tests failing a pending enrollment.
///
/// Expected: Ok(true) with no enrollment date
#[tokio::test]
async fn failure_leaves_enrolled_at_empty() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let user = factory::create_user(db).await?;
    let course = factory::create_course(db, admin.id).await?;
    let enrollment = EnrollmentFactory::new(db, user.id, course.id)
        .pending("ref_declined")
        .build()
        .await?;

    let repo = EnrollmentRepository::new(db);
    assert!(repo.settle(enrollment.id, EnrollmentStatus::Failed).await?);

    let stored = repo.find_by_id(enrollment.id).await?.unwrap();
    assert_eq!(stored.payment_status, EnrollmentStatus::Failed);
    assert!(stored.enrolled_at.is_none());

    Ok(())
}
