use super::*;

/// Tests verifying with an emailed 6-digit code.
///
/// Expected: Err(BadRequest) for a wrong code, then Ok with the account verified
#[tokio::test]
async fn verifies_with_emailed_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .verified(false)
            .build()
            .await?,
    );

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    service.send_verification_code(&user).await?;
    let sent = mailer.sent_to(&user.email);
    let code = secret_after(&sent[0].body, "verification code is ");
    assert_eq!(code.len(), 6);

    let wrong = if code == "123456" { "654321" } else { "123456" };
    let rejected = service.verify_verification_code(&user, wrong).await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));

    let verified = service.verify_verification_code(&user, &code).await?;
    assert!(verified.verified);

    Ok(())
}

/// Tests verifying from the signup link.
///
/// Expected: Ok with the account verified, then Err(BadRequest) on reuse
#[tokio::test]
async fn verifies_with_signup_link() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    service
        .signup(signup_param("ada@example.com", "08012345678"))
        .await?;
    let body = mailer.sent_to("ada@example.com")[0].body.clone();
    let token = secret_after(&body, "token=");
    assert_eq!(token.len(), 64);

    let verified = service.verify_email_link("ada@example.com", &token).await?;
    assert!(verified.verified);

    let again = service.verify_email_link("ada@example.com", &token).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests requesting a code for an already verified account.
///
/// Expected: Err(BadRequest) and no email sent
#[tokio::test]
async fn already_verified_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(factory::create_user(db).await?);

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    let result = service.send_verification_code(&user).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(mailer.sent().is_empty());

    Ok(())
}
