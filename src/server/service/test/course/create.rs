use super::*;

/// Tests creating courses with colliding titles.
///
/// Expected: Ok with slugs `rust-basics` and `rust-basics-2`
#[tokio::test]
async fn generates_unique_slugs() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let service = CourseService::new(db);

    let first = service.create(&admin, course_param("Rust Basics")).await?;
    let second = service.create(&admin, course_param("Rust basics!")).await?;

    assert_eq!(first.slug, "rust-basics");
    assert_eq!(second.slug, "rust-basics-2");
    assert_eq!(first.created_by, admin.id);

    Ok(())
}

/// Tests creating a course as a learner.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn learner_cannot_create() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = User::from_entity(factory::create_user(db).await?);

    let result = CourseService::new(db)
        .create(&learner, course_param("Rust Basics"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
