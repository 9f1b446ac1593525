use super::*;

/// Tests changing the password.
///
/// Verifies that the old password is checked, the new one works for sign in and the
/// returned token carries the bumped version.
///
/// Expected: Err(InvalidCredentials) for a wrong old password, then Ok
#[tokio::test]
async fn change_password_revokes_old_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .email("ada@example.com")
            .password_hash(hash_secret(PASSWORD)?)
            .build()
            .await?,
    );

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    let wrong = service
        .change_password(
            &user,
            ChangePasswordParam {
                old_password: "Nope12345".to_string(),
                new_password: "Newpass123".to_string(),
            },
        )
        .await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let token = service
        .change_password(
            &user,
            ChangePasswordParam {
                old_password: PASSWORD.to_string(),
                new_password: "Newpass123".to_string(),
            },
        )
        .await?;

    let claims = jwt.validate(&token.token).unwrap();
    assert_eq!(claims.ver, user.token_version + 1);
    assert!(service.signin("ada@example.com", "Newpass123").await.is_ok());
    assert!(service.signin("ada@example.com", PASSWORD).await.is_err());

    Ok(())
}

/// Tests the forgot-password flow.
///
/// Expected: Err(BadRequest) for a wrong code, then Ok and sign in with the new password
#[tokio::test]
async fn resets_password_with_emailed_code() -> Result<(), AppError> {
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

    service.send_forgot_password_code("ada@example.com").await?;
    let body = mailer.sent_to("ada@example.com")[0].body.clone();
    let code = secret_after(&body, "password reset code is ");
    assert_eq!(code.len(), 6);

    let wrong_code = if code == "abcdef" { "fedcba" } else { "abcdef" };
    let rejected = service
        .reset_password(ResetPasswordParam {
            email: "ada@example.com".to_string(),
            code: wrong_code.to_string(),
            new_password: "Newpass123".to_string(),
        })
        .await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));

    service
        .reset_password(ResetPasswordParam {
            email: "ada@example.com".to_string(),
            code,
            new_password: "Newpass123".to_string(),
        })
        .await?;

    assert!(service.signin("ada@example.com", "Newpass123").await.is_ok());

    Ok(())
}

/// Tests requesting a reset code for an unknown email.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_email_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    let result = service.send_forgot_password_code("ghost@example.com").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
