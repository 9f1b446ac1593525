use super::*;

fn create_param(email: &str, phone_number: &str) -> CreateUserParam {
    CreateUserParam {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone_number: phone_number.to_string(),
        registrant_type: RegistrantType::Individual,
        password_hash: "hash".to_string(),
        verification_code_hash: Some("code-hash".to_string()),
    }
}

/// Tests creating a new learner account.
///
/// Verifies that new accounts start as unverified learners with token version 0 and that
/// the verification code issue time is stamped alongside the hash.
///
/// Expected: Ok with learner defaults
#[tokio::test]
async fn creates_unverified_learner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(create_param("ada@example.com", "08012345678"))
        .await?;

    assert_eq!(user.role, Role::Learner);
    assert!(!user.verified);
    assert_eq!(user.token_version, 0);

    let credentials = repo.find_credentials_by_id(user.id).await?.unwrap();
    assert_eq!(credentials.verification_code_hash.as_deref(), Some("code-hash"));
    assert!(credentials.verification_code_issued_at.is_some());

    Ok(())
}

/// Tests the unique constraint on email.
///
/// Verifies that inserting a second account with the same email fails at the database
/// level, independent of the service-level pre-check.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn duplicate_email_fails() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(create_param("ada@example.com", "08012345678"))
        .await?;

    let result = repo
        .create(create_param("ada@example.com", "08087654321"))
        .await;

    assert!(result.is_err());

    Ok(())
}

/// Tests that a self-registered account survives a write and read back.
///
/// Verifies the stored registrant type decodes to the same variant it was written with,
/// both from the insert result and from a fresh lookup.
///
/// Expected: Ok with RegistrantType::Individual
#[tokio::test]
async fn individual_registrant_round_trips() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let created = repo
        .create(create_param("ada@example.com", "08012345678"))
        .await?;
    assert_eq!(created.registrant_type, RegistrantType::Individual);

    let fetched = repo.find_by_id(created.id).await?.unwrap();
    assert_eq!(fetched.registrant_type, RegistrantType::Individual);
    assert_eq!(fetched.into_dto().registrant_type, "self");

    Ok(())
}
