use super::*;

/// Tests a successful signup.
///
/// Verifies that the account is created unverified as a learner and that a verification
/// link pointing at the API is emailed.
///
/// Expected: Ok with unverified learner and one email containing the link
#[tokio::test]
async fn creates_unverified_learner_and_sends_link() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    let user = service
        .signup(signup_param("ada@example.com", "08012345678"))
        .await?;

    assert!(!user.verified);
    assert!(!user.is_admin());

    let sent = mailer.sent_to("ada@example.com");
    assert_eq!(sent.len(), 1);
    assert!(sent[0]
        .body
        .contains("http://localhost:8080/api/verify-email?token="));
    assert!(sent[0].body.contains("email=ada%40example.com"));

    Ok(())
}

/// Tests signing up with an email or phone number already in use.
///
/// Expected: Err(Conflict) for both duplicates
#[tokio::test]
async fn duplicate_email_or_phone_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .phone_number("08099999999")
        .build()
        .await?;

    let jwt = jwt();
    let mailer = RecordingMailer::default();
    let service = AuthService::new(db, &jwt, &mailer, APP_URL);

    let same_email = service
        .signup(signup_param("taken@example.com", "08011111111"))
        .await;
    assert!(matches!(same_email, Err(AppError::Conflict(_))));

    let same_phone = service
        .signup(signup_param("fresh@example.com", "08099999999"))
        .await;
    assert!(matches!(same_phone, Err(AppError::Conflict(_))));

    assert!(mailer.sent().is_empty());

    Ok(())
}
