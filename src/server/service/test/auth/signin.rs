use super::*;

/// Tests signing in with valid credentials.
///
/// Expected: Ok with a token whose claims carry the user id and token version
#[tokio::test]
async fn issues_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::user::UserFactory::new(db)
        .email("ada@example.com")
        .password_hash(hash_secret(PASSWORD)?)
        .token_version(3)
        .build()
        .await?;

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    let token = service.signin(" ADA@example.com ", PASSWORD).await?;

    let claims = jwt.validate(&token.token).unwrap();
    assert_eq!(claims.sub, stored.id);
    assert_eq!(claims.ver, 3);
    assert_eq!(token.expires_in, 3600);
    assert_eq!(token.user.id, stored.id);

    Ok(())
}

/// Tests signing in with a wrong password or unknown email.
///
/// Expected: Err(AuthErr(InvalidCredentials)) for both
#[tokio::test]
async fn rejects_bad_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("ada@example.com")
        .password_hash(hash_secret(PASSWORD)?)
        .build()
        .await?;

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    let wrong_password = service.signin("ada@example.com", "Wrong1234").await;
    assert!(matches!(
        wrong_password,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let unknown = service.signin("nobody@example.com", PASSWORD).await;
    assert!(matches!(
        unknown,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests signing out.
///
/// Expected: Ok with the stored token version incremented
#[tokio::test]
async fn signout_bumps_token_version() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    AuthService::new(db, &jwt, &mailer, APP_URL)
        .signout(&user)
        .await?;

    let stored = crate::server::data::user::UserRepository::new(db)
        .find_by_id(user.id)
        .await?
        .unwrap();
    assert_eq!(stored.token_version, user.token_version + 1);

    Ok(())
}
