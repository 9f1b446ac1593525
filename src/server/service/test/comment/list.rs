use super::*;

/// Tests listing comments on a content item.
///
/// Verifies that only top-level comments are listed, newest first, with their reply ids
/// and like counts.
///
/// Expected: Ok with two top-level comments, replies and likes attached
#[tokio::test]
async fn lists_top_level_with_replies_and_likes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    let older = factory::create_comment(db, author.id, content.id).await?;
    let newer = factory::create_comment(db, author.id, content.id).await?;
    let reply = CommentFactory::new(db, author.id, content.id)
        .reply_to(older.id)
        .build()
        .await?;
    factory::comment::like_comment(db, older.id, author.id).await?;

    let page = CommentService::new(db)
        .list(content.id, PageParam::default())
        .await?;

    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].comment.id, newer.id);

    let listed_older = page
        .items
        .iter()
        .find(|view| view.comment.id == older.id)
        .unwrap();
    assert_eq!(listed_older.reply_ids, vec![reply.id]);
    assert_eq!(listed_older.like_count, 1);
    assert_eq!(listed_older.author.id, author.id);

    Ok(())
}

/// Tests pagination bounds.
///
/// Expected: Ok with the second page holding the remaining comment
#[tokio::test]
async fn paginates() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    for _ in 0..3 {
        factory::create_comment(db, author.id, content.id).await?;
    }

    let page = CommentService::new(db)
        .list(content.id, PageParam { page: 2, limit: 2 })
        .await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_pages(), 2);

    Ok(())
}

/// Tests listing comments on content that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_content_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CommentService::new(db)
        .list(999, PageParam::default())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
