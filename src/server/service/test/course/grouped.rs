use super::*;

/// Tests grouping by category.
///
/// Expected: Ok with categories in alphabetical order
#[tokio::test]
async fn groups_by_category() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    CourseFactory::new(db, admin.id).category("web").build().await?;
    CourseFactory::new(db, admin.id).category("data").build().await?;
    CourseFactory::new(db, admin.id).category("web").build().await?;

    let groups = CourseService::new(db).grouped_by_category().await?;

    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["data", "web"]);
    assert_eq!(groups[1].courses.len(), 2);

    Ok(())
}

/// Tests grouping by level.
///
/// Expected: Ok with beginner before advanced and no empty intermediate group
#[tokio::test]
async fn groups_by_level_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    CourseFactory::new(db, admin.id)
        .level(CourseLevel::Advanced)
        .build()
        .await?;
    CourseFactory::new(db, admin.id)
        .level(CourseLevel::Beginner)
        .build()
        .await?;

    let groups = CourseService::new(db).grouped_by_level().await?;

    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["beginner", "advanced"]);

    Ok(())
}

/// Tests splitting courses into free and paid.
///
/// Expected: Ok with one free and two paid courses
#[tokio::test]
async fn splits_free_and_paid() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    factory::create_course(db, admin.id).await?;
    factory::course::create_paid_course(db, admin.id, 1000).await?;
    factory::course::create_paid_course(db, admin.id, 5000).await?;

    let (free, paid) = CourseService::new(db).grouped_by_price().await?;

    assert_eq!(free.len(), 1);
    assert_eq!(paid.len(), 2);
    assert!(paid.iter().all(|course| course.price > 0));

    Ok(())
}
