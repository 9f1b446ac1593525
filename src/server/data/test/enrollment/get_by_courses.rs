use super::*;

/// Tests listing enrollments across several courses.
///
/// Verifies that only the requested courses are included, the limit is applied and the
/// completed learner ids of a course are returned.
///
/// Expected: Ok with enrollments from the requested courses only
#[tokio::test]
async fn filters_by_course_and_limit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let course = factory::create_course(db, admin.id).await?;
    let other_course = factory::create_course(db, admin.id).await?;

    factory::create_enrollment(db, first.id, course.id).await?;
    EnrollmentFactory::new(db, second.id, course.id)
        .pending("ref_listing")
        .build()
        .await?;
    factory::create_enrollment(db, first.id, other_course.id).await?;

    let repo = EnrollmentRepository::new(db);

    let all = repo.get_by_courses(&[course.id], None).await?;
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|e| e.course_id == course.id));

    let limited = repo.get_by_courses(&[course.id, other_course.id], Some(2)).await?;
    assert_eq!(limited.len(), 2);

    assert!(repo.get_by_courses(&[], None).await?.is_empty());

    let completed = repo.get_completed_user_ids(course.id).await?;
    assert_eq!(completed, vec![first.id]);

    Ok(())
}
