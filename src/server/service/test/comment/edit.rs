use super::*;

/// Tests editing one's own comment.
///
/// Expected: Ok with new text
#[tokio::test]
async fn author_edits_comment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    let comment = factory::create_comment(db, author.id, content.id).await?;

    let view = CommentService::new(db)
        .edit(&User::from_entity(author), comment.id, text("Edited"))
        .await?;

    assert_eq!(view.comment.text, "Edited");

    Ok(())
}

/// Tests editing someone else's comment.
///
/// Expected: Err(AuthErr(AccessDenied)) for a learner, Ok for an admin
#[tokio::test]
async fn only_author_or_admin_may_edit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _, _, content) = create_catalog(db).await?;
    let author = factory::create_user(db).await?;
    let other = User::from_entity(factory::create_user(db).await?);
    let comment = factory::create_comment(db, author.id, content.id).await?;

    let service = CommentService::new(db);

    let denied = service.edit(&other, comment.id, text("Hijacked")).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let moderated = service
        .edit(&User::from_entity(admin), comment.id, text("[removed]"))
        .await?;
    assert_eq!(moderated.comment.text, "[removed]");
    assert_eq!(moderated.author.id, author.id);

    Ok(())
}
