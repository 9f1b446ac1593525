use super::*;

/// Tests deleting a content item that has a discussion.
///
/// Verifies that comments, replies and likes on the content item are removed first so the
/// foreign keys allow the delete, and that sibling content is untouched.
///
/// Expected: Ok(1) and only the sibling's rows remain
#[tokio::test]
async fn content_delete_removes_discussion() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _course, module, content) = create_catalog(db).await?;
    let sibling = factory::create_content(db, module.id).await?;
    let learner = factory::create_user(db).await?;

    let comment = factory::create_comment(db, learner.id, content.id).await?;
    factory::comment::CommentFactory::new(db, admin.id, content.id)
        .reply_to(comment.id)
        .build()
        .await?;
    factory::comment::like_comment(db, comment.id, admin.id).await?;
    factory::create_comment(db, learner.id, sibling.id).await?;

    let repo = CatalogRepository::new(db);
    assert_eq!(repo.delete_content(content.id).await?, 1);

    assert_eq!(entity::prelude::Content::find().count(db).await?, 1);
    assert_eq!(entity::prelude::Comment::find().count(db).await?, 1);
    assert_eq!(entity::prelude::CommentLike::find().count(db).await?, 0);

    Ok(())
}

/// Tests deleting a whole course.
///
/// Verifies that modules, content, enrollments, completions and comments beneath the
/// course are removed with it.
///
/// Expected: Ok(1) and every dependent table is empty
#[tokio::test]
async fn course_delete_cascades() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_admin, course, module, content) = create_catalog(db).await?;
    let learner = factory::create_user(db).await?;
    let enrollment = factory::create_enrollment(db, learner.id, course.id).await?;
    factory::enrollment::complete_module(db, enrollment.id, module.id).await?;
    factory::create_comment(db, learner.id, content.id).await?;

    let repo = CatalogRepository::new(db);
    assert_eq!(repo.delete_courses(&[course.id]).await?, 1);

    assert_eq!(entity::prelude::Course::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Module::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Content::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Enrollment::find().count(db).await?, 0);
    assert_eq!(entity::prelude::EnrollmentModule::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Comment::find().count(db).await?, 0);

    Ok(())
}
