use super::*;

/// Tests replying to a comment.
///
/// Expected: Ok with the reply linked to its parent
#[tokio::test]
async fn links_reply_to_parent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    let replier = User::from_entity(factory::create_user(db).await?);
    let parent = factory::create_comment(db, author.id, content.id).await?;

    let reply = CommentService::new(db)
        .reply(&replier, content.id, parent.id, text("Agreed"))
        .await?;

    assert_eq!(reply.comment.parent_id, Some(parent.id));
    assert_eq!(reply.comment.content_id, content.id);
    assert_eq!(reply.comment.text, "Agreed");
    assert_eq!(reply.author.id, replier.id);

    Ok(())
}

/// Tests replying to a comment under a different content item.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_parent_from_other_content() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, module, content) = create_catalog(db).await?;
    let other_content = factory::create_content(db, module.id).await?;
    let author = User::from_entity(factory::create_user(db).await?);
    let parent = factory::create_comment(db, author.id, content.id).await?;

    let result = CommentService::new(db)
        .reply(&author, other_content.id, parent.id, text("Wrong thread"))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests replying to a comment that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_parent_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = User::from_entity(factory::create_user(db).await?);

    let result = CommentService::new(db)
        .reply(&author, content.id, 321, text("Hello?"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
