use super::*;

/// Tests renaming a course.
///
/// Expected: Ok with new title and regenerated slug
#[tokio::test]
async fn new_title_regenerates_slug() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let service = CourseService::new(db);
    let course = service.create(&admin, course_param("Rust Basics")).await?;

    let updated = service
        .update(
            &admin,
            course.id,
            UpdateCourseParam {
                title: Some("Advanced Rust".to_string()),
                price: Some(2500),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.title, "Advanced Rust");
    assert_eq!(updated.slug, "advanced-rust");
    assert_eq!(updated.price, 2500);
    assert_eq!(updated.description, course.description);

    Ok(())
}

/// Tests updating a course owned by another admin.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn other_admin_cannot_update() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_admin(db).await?;
    let other = User::from_entity(factory::create_admin(db).await?);
    let course = factory::create_course(db, owner.id).await?;

    let result = CourseService::new(db)
        .update(
            &other,
            course.id,
            UpdateCourseParam {
                price: Some(100),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
