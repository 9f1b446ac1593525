use super::*;

/// Tests liking and unliking a comment.
///
/// Verifies that a user can like a comment once, that counts are grouped per comment and
/// that unliking reports whether a like was removed.
///
/// Expected: duplicate like fails, unlike returns true then false
#[tokio::test]
async fn likes_are_unique_per_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_comment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, _course, _module, content) = create_catalog(db).await?;
    let learner = factory::create_user(db).await?;
    let comment = factory::create_comment(db, admin.id, content.id).await?;
    let unliked = factory::create_comment(db, admin.id, content.id).await?;

    let repo = CommentRepository::new(db);

    repo.like(comment.id, learner.id).await?;
    repo.like(comment.id, admin.id).await?;
    assert!(repo.like(comment.id, learner.id).await.is_err());

    assert!(entity::prelude::CommentLike::find_by_id((comment.id, learner.id))
        .one(db)
        .await?
        .is_some());
    assert_eq!(repo.count_likes(comment.id).await?, 2);
    assert_eq!(repo.count_likes_received(admin.id).await?, 2);

    let counts = repo.get_like_counts(&[comment.id, unliked.id]).await?;
    assert_eq!(counts.get(&comment.id), Some(&2));
    assert!(!counts.contains_key(&unliked.id));

    assert!(repo.unlike(comment.id, learner.id).await?);
    assert!(!repo.unlike(comment.id, learner.id).await?);
    assert_eq!(repo.count_likes(comment.id).await?, 1);

    Ok(())
}
