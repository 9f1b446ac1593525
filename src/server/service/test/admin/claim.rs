use super::*;

/// Tests redeeming the startup code.
///
/// Expected: Ok with the caller promoted to admin and the code consumed
#[tokio::test]
async fn valid_code_grants_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let codes = AdminCodeService::new();
    let code = codes.generate().await;

    let admin = AdminService::new(db, &codes).claim(&user, &code).await?;

    assert_eq!(admin.id, user.id);
    assert_eq!(admin.role, Role::Admin);
    assert!(!codes.has_valid_code().await);

    Ok(())
}

/// Tests redeeming a wrong code.
///
/// Expected: Err(AuthErr(AccessDenied)) and the role unchanged
#[tokio::test]
async fn wrong_code_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let codes = AdminCodeService::new();
    codes.generate().await;

    let result = AdminService::new(db, &codes).claim(&user, "not-the-code").await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    let stored = entity::prelude::User::find_by_id(user.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.role, Role::Learner);

    Ok(())
}

/// Tests redeeming a code after it expired.
///
/// Expected: Err(AuthErr(AccessDenied))
#[tokio::test]
async fn expired_code_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);
    let codes = AdminCodeService::with_ttl(Duration::ZERO);
    let code = codes.generate().await;

    let result = AdminService::new(db, &codes).claim(&user, &code).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
