use super::*;

/// Tests verified user passes the verification check.
///
/// Expected: Ok(User)
#[tokio::test]
async fn grants_access_to_verified_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let user = factory::create_user(db).await?;
    let headers = bearer(&token_for(&jwt, &user));

    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::Verified])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests unverified user is rejected when verification is required.
///
/// Expected: Err(AuthError::EmailNotVerified)
#[tokio::test]
async fn rejects_unverified_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let user = factory::user::UserFactory::new(db)
        .verified(false)
        .build()
        .await?;
    let headers = bearer(&token_for(&jwt, &user));

    let result = AuthGuard::new(db, &jwt, &headers)
        .require(&[Permission::Verified])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::EmailNotVerified(id))) if id == user.id
    ));

    Ok(())
}

/// Tests unverified user still authenticates when no permission is required.
///
/// Expected: Ok(User) with verified=false
#[tokio::test]
async fn allows_unverified_user_without_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let user = factory::user::UserFactory::new(db)
        .verified(false)
        .build()
        .await?;
    let headers = bearer(&token_for(&jwt, &user));

    let user = AuthGuard::new(db, &jwt, &headers).require(&[]).await?;

    assert!(!user.verified);

    Ok(())
}
