use super::*;

/// Tests detecting when no admin users exist.
///
/// Verifies that the repository returns false on first-time setup, when only learners
/// have signed up.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    assert!(!repo.admin_exists().await?);

    Ok(())
}

/// Tests detecting an admin promoted through `set_role`.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_after_promotion() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let promoted = repo.set_role(user.id, Role::Admin).await?.unwrap();

    assert!(promoted.is_admin());
    assert!(repo.admin_exists().await?);

    Ok(())
}
