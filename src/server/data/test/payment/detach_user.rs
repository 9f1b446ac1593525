use super::*;

/// Tests unlinking a user's payments.
///
/// Verifies that only the given user's payments lose their user link and that the rows
/// themselves, including their status, are kept.
///
/// Expected: Ok(1) with the other user's payment untouched
#[tokio::test]
async fn clears_user_link_and_keeps_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let leaving = factory::create_user(db).await?;
    let staying = factory::create_user(db).await?;
    PaymentFactory::new(db, leaving.id)
        .reference("ref_leaving")
        .status(PaymentStatus::Success)
        .build()
        .await?;
    PaymentFactory::new(db, staying.id)
        .reference("ref_staying")
        .build()
        .await?;

    let repo = PaymentRepository::new(db);
    assert_eq!(repo.detach_user(leaving.id).await?, 1);

    let detached = repo.find_by_reference("ref_leaving").await?.unwrap();
    assert_eq!(detached.user_id, None);
    assert_eq!(detached.status, PaymentStatus::Success);

    let untouched = repo.find_by_reference("ref_staying").await?.unwrap();
    assert_eq!(untouched.user_id, Some(staying.id));
    assert!(repo.get_by_user(leaving.id).await?.is_empty());

    Ok(())
}
