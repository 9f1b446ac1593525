use super::*;

/// Tests deleting a learner account.
///
/// Verifies that the learner's comments, likes and enrollments go with it while other users'
/// data stays. Payments are kept as financial records with their user link cleared.
///
/// Expected: Ok with only the remaining users' rows and the unlinked payment left
#[tokio::test]
async fn removes_learner_data() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (admin, course, _, content) = factory::helpers::create_catalog(db).await?;
    let learner = factory::create_user(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;
    let payment = factory::create_payment(db, learner.id).await?;
    let learner_comment = factory::create_comment(db, learner.id, content.id).await?;
    let admin_comment = factory::create_comment(db, admin.id, content.id).await?;
    factory::comment::like_comment(db, admin_comment.id, learner.id).await?;
    factory::comment::like_comment(db, learner_comment.id, admin.id).await?;

    UserService::new(db)
        .delete_user(&User::from_entity(admin.clone()), learner.id)
        .await?;

    assert!(entity::prelude::User::find_by_id(learner.id)
        .one(db)
        .await?
        .is_none());
    assert_eq!(entity::prelude::Enrollment::find().count(db).await?, 0);
    let kept = entity::prelude::Payment::find_by_id(payment.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(kept.user_id, None);
    assert_eq!(kept.reference, payment.reference);
    assert_eq!(entity::prelude::Comment::find().count(db).await?, 1);
    assert_eq!(entity::prelude::CommentLike::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Course::find().count(db).await?, 1);

    Ok(())
}

/// Tests deleting an admin who owns courses.
///
/// Expected: Ok with the admin's courses and their enrollments removed
#[tokio::test]
async fn removes_owned_courses() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, course, _, _) = factory::helpers::create_catalog(db).await?;
    let learner = factory::create_user(db).await?;
    factory::create_enrollment(db, learner.id, course.id).await?;

    let owner = User::from_entity(owner);
    UserService::new(db).delete_user(&owner, owner.id).await?;

    assert_eq!(entity::prelude::Course::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Module::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Enrollment::find().count(db).await?, 0);
    assert_eq!(entity::prelude::User::find().count(db).await?, 1);

    Ok(())
}

/// Tests a learner deleting someone else's account.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn learner_cannot_delete_others() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let victim = factory::create_user(db).await?;
    let learner = User::from_entity(factory::create_user(db).await?);

    let result = UserService::new(db).delete_user(&learner, victim.id).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
