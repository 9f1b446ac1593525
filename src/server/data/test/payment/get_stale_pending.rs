use super::*;

/// Tests selecting pending payments older than a cutoff.
///
/// Verifies that settled payments are skipped and that a cutoff in the past excludes
/// payments created just now.
///
/// Expected: Ok with only the pending payment when the cutoff is in the future
#[tokio::test]
async fn selects_pending_before_cutoff() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    PaymentFactory::new(db, user.id)
        .reference("ref_pending")
        .build()
        .await?;
    PaymentFactory::new(db, user.id)
        .reference("ref_done")
        .status(PaymentStatus::Success)
        .build()
        .await?;

    let repo = PaymentRepository::new(db);

    let stale = repo
        .get_stale_pending(Utc::now() + Duration::minutes(1))
        .await?;
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].reference, "ref_pending");

    let recent = repo
        .get_stale_pending(Utc::now() - Duration::minutes(30))
        .await?;
    assert!(recent.is_empty());

    Ok(())
}
