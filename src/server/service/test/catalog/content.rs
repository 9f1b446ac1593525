use super::*;

/// Tests adding an image item to a module of the caller's course.
///
/// Expected: Ok with the kind and URL stored
#[tokio::test]
async fn owner_adds_content() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let course = factory::create_course(db, admin.id).await?;
    let module = factory::create_module(db, course.id).await?;

    let content = ContentService::new(db)
        .create(&admin, image_param(module.id))
        .await?;

    assert_eq!(content.module_id, module.id);
    assert_eq!(content.kind, ContentKind::Image);
    assert_eq!(
        content.image_url.as_deref(),
        Some("https://cdn.example.com/borrow.png")
    );

    Ok(())
}

/// Tests adding content as a learner.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn learner_cannot_add_content() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);
    let course = factory::create_course(db, admin.id).await?;
    let module = factory::create_module(db, course.id).await?;

    let result = ContentService::new(db)
        .create(&learner, image_param(module.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests clearing the image URL through an update.
///
/// Expected: Ok with the image URL removed and the title untouched
#[tokio::test]
async fn update_clears_url() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let course = factory::create_course(db, admin.id).await?;
    let module = factory::create_module(db, course.id).await?;
    let service = ContentService::new(db);
    let content = service.create(&admin, image_param(module.id)).await?;

    let updated = service
        .update(
            &admin,
            content.id,
            UpdateContentParam {
                image_url: Some(None),
                ..Default::default()
            },
        )
        .await?;

    assert!(updated.image_url.is_none());
    assert_eq!(updated.title, content.title);

    Ok(())
}

/// Tests deleting a content item with a discussion.
///
/// Expected: Ok with the item and its comments removed
#[tokio::test]
async fn delete_removes_comments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?);
    let course = factory::create_course(db, admin.id).await?;
    let module = factory::create_module(db, course.id).await?;
    let content = factory::create_content(db, module.id).await?;
    factory::create_comment(db, admin.id, content.id).await?;

    ContentService::new(db).delete(&admin, content.id).await?;

    assert_eq!(entity::prelude::Content::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Comment::find().count(db).await?, 0);

    let missing = ContentService::new(db).get_by_id(content.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}
