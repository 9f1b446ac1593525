use super::*;

/// Tests replacing a password.
///
/// Verifies that the hash is replaced, the forgot-password code is cleared and the token
/// version is bumped so older tokens stop validating.
///
/// Expected: Ok with version incremented and code cleared
#[tokio::test]
async fn bumps_version_and_clears_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).token_version(3).build().await?;

    let repo = UserRepository::new(db);
    repo.set_forgot_password_code(user.id, "reset-hash".to_string())
        .await?;
    repo.update_password(user.id, "new-hash".to_string())
        .await?;

    let credentials = repo.find_credentials_by_id(user.id).await?.unwrap();
    assert_eq!(credentials.password_hash, "new-hash");
    assert!(credentials.forgot_password_code_hash.is_none());
    assert!(credentials.forgot_password_code_issued_at.is_none());
    assert_eq!(credentials.user.token_version, 4);

    Ok(())
}

/// Tests that verifying an account clears the outstanding code.
///
/// Expected: Ok with verified set and code removed
#[tokio::test]
async fn mark_verified_clears_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).verified(false).build().await?;

    let repo = UserRepository::new(db);
    repo.set_verification_code(user.id, "code-hash".to_string())
        .await?;
    let verified = repo.mark_verified(user.id).await?.unwrap();

    assert!(verified.verified);
    let credentials = repo.find_credentials_by_id(user.id).await?.unwrap();
    assert!(credentials.verification_code_hash.is_none());

    Ok(())
}
