use super::*;

/// Tests deleting a comment with replies and likes.
///
/// Expected: Ok with the comment, its reply and all likes removed
#[tokio::test]
async fn removes_replies_and_likes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let comment = factory::create_comment(db, author.id, content.id).await?;
    let reply = CommentFactory::new(db, other.id, content.id)
        .reply_to(comment.id)
        .build()
        .await?;
    factory::comment::like_comment(db, comment.id, other.id).await?;
    factory::comment::like_comment(db, reply.id, author.id).await?;
    let untouched = factory::create_comment(db, other.id, content.id).await?;

    CommentService::new(db)
        .delete(&User::from_entity(author), comment.id)
        .await?;

    assert_eq!(entity::prelude::Comment::find().count(db).await?, 1);
    assert!(entity::prelude::Comment::find_by_id(untouched.id)
        .one(db)
        .await?
        .is_some());
    assert_eq!(entity::prelude::CommentLike::find().count(db).await?, 0);

    Ok(())
}

/// Tests deleting another learner's comment.
///
/// Expected: Err(AuthErr(AccessDenied)) and the comment kept
#[tokio::test]
async fn other_learner_cannot_delete() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    let other = User::from_entity(factory::create_user(db).await?);
    let comment = factory::create_comment(db, author.id, content.id).await?;

    let result = CommentService::new(db).delete(&other, comment.id).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert_eq!(entity::prelude::Comment::find().count(db).await?, 1);

    Ok(())
}
