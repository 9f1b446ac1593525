use super::*;

/// Tests toggling a like twice.
///
/// Verifies that the first toggle likes the comment and the second restores the original
/// like set.
///
/// Expected: Ok with liked then unliked, counts 1 then 0
#[tokio::test]
async fn double_toggle_restores_likes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    let reader = User::from_entity(factory::create_user(db).await?);
    let comment = factory::create_comment(db, author.id, content.id).await?;

    let service = CommentService::new(db);

    let first = service.toggle_like(&reader, comment.id).await?;
    assert!(first.liked);
    assert_eq!(first.like_count, 1);

    let second = service.toggle_like(&reader, comment.id).await?;
    assert!(!second.liked);
    assert_eq!(second.like_count, 0);

    assert_eq!(entity::prelude::CommentLike::find().count(db).await?, 0);

    Ok(())
}

/// Tests that likes from different users are counted independently.
///
/// Expected: Ok with a count of 2 after two users like the comment
#[tokio::test]
async fn counts_likes_per_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    let comment = factory::create_comment(db, author.id, content.id).await?;
    factory::comment::like_comment(db, comment.id, author.id).await?;

    let reader = User::from_entity(factory::create_user(db).await?);
    let toggle = CommentService::new(db)
        .toggle_like(&reader, comment.id)
        .await?;

    assert!(toggle.liked);
    assert_eq!(toggle.like_count, 2);

    Ok(())
}

/// Tests liking a comment that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_comment_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let reader = User::from_entity(factory::create_user(db).await?);

    let result = CommentService::new(db).toggle_like(&reader, 77).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
