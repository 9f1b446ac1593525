use super::*;

fn success() -> SettlePaymentParam {
    SettlePaymentParam {
        status: PaymentStatus::Success,
        payment_method: Some("card".to_string()),
        paid_at: Some(Utc::now()),
        metadata: None,
        raw_response: json!({ "status": "success" }),
    }
}

/// Tests the conditional transition out of pending.
///
/// Verifies that the first settle writes the terminal values and a replay finds nothing
/// left to update, leaving the first result in place.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn settles_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    PaymentFactory::new(db, user.id)
        .reference("ref_once")
        .course(3)
        .build()
        .await?;

    let repo = PaymentRepository::new(db);
    assert!(repo.settle("ref_once", success()).await?);

    let replay = SettlePaymentParam {
        status: PaymentStatus::Failed,
        ..success()
    };
    assert!(!repo.settle("ref_once", replay).await?);

    let stored = repo.find_by_reference("ref_once").await?.unwrap();
    assert_eq!(stored.status, PaymentStatus::Success);
    assert_eq!(stored.payment_method.as_deref(), Some("card"));
    assert!(stored.paid_at.is_some());
    // Gateway sent no metadata, so the checkout metadata is kept
    assert_eq!(stored.metadata, Some(json!({ "course_id": 3 })));

    Ok(())
}

/// Tests settling an unknown reference.
///
/// Expected: Ok(false)
#[tokio::test]
async fn unknown_reference_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_enrollment_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PaymentRepository::new(db);
    assert!(!repo.settle("ref_missing", success()).await?);

    Ok(())
}
