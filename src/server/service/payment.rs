//! Payments outside the enrollment checkout: generic initialization, verification by
//! reference, the gateway webhook and the reconciliation of stale pending payments.
//!
//! Settlement always goes through `EnrollmentService::apply_verification`, so a payment linked
//! to an enrollment is settled together with it no matter which path observes the result
//! first.

use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{EnrollmentStatus, PaymentStatus};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::{
    model::payment::PaymentVerificationDto,
    server::{
        data::{enrollment::EnrollmentRepository, payment::PaymentRepository},
        error::{internal::InternalError, payment::PaymentError, AppError},
        gateway::{Checkout, InitializeRequest, PaymentGateway, Verification},
        mailer::Mailer,
        middleware::policy::{authorize, Action, Resource},
        model::{
            enrollment::{Enrollment, Settlement},
            payment::{CreatePaymentParam, InitializePaymentParam, Payment, SettlePaymentParam},
            user::User,
        },
        service::enrollment::EnrollmentService,
        util::signature::verify_signature,
    },
};

/// Webhook event that carries a successful charge.
const CHARGE_SUCCESS: &str = "charge.success";

/// Payment together with the enrollment it paid for, if any.
#[derive(Debug, Clone)]
pub struct PaymentVerification {
    pub payment: Payment,
    pub enrollment: Option<Enrollment>,
}

impl PaymentVerification {
    pub fn into_dto(self) -> PaymentVerificationDto {
        PaymentVerificationDto {
            payment: self.payment.into_dto(),
            enrollment: self.enrollment.map(Enrollment::into_dto),
        }
    }
}

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn PaymentGateway,
    mailer: &'a dyn Mailer,
    currency: &'a str,
}

impl<'a> PaymentService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        gateway: &'a dyn PaymentGateway,
        mailer: &'a dyn Mailer,
        currency: &'a str,
    ) -> Self {
        Self {
            db,
            gateway,
            mailer,
            currency,
        }
    }

    fn enrollments(&self) -> EnrollmentService<'a> {
        EnrollmentService::new(self.db, self.gateway, self.mailer, self.currency)
    }

    /// Opens a checkout for an arbitrary amount and records the pending payment.
    ///
    /// The payer email defaults to the caller's address.
    pub async fn initialize(
        &self,
        user: &User,
        param: InitializePaymentParam,
    ) -> Result<Checkout, AppError> {
        let currency = param
            .currency
            .unwrap_or_else(|| self.currency.to_string());
        let email = param.email.unwrap_or_else(|| user.email.clone());

        let checkout = self
            .gateway
            .initialize(InitializeRequest {
                amount: param.amount,
                email,
                currency: currency.clone(),
                metadata: param.metadata.clone(),
            })
            .await?;

        PaymentRepository::new(self.db)
            .create(CreatePaymentParam {
                user_id: user.id,
                reference: checkout.reference.clone(),
                amount: param.amount,
                currency,
                metadata: param.metadata,
                raw_response: checkout.raw.clone(),
            })
            .await?;

        tracing::info!(
            "User {} initialized payment {} for {}",
            user.id,
            checkout.reference,
            param.amount
        );

        Ok(checkout)
    }

    /// Settles `payment` with a verification, together with its enrollment when the paying
    /// account still exists.
    async fn settle(
        &self,
        payment: &Payment,
        verification: &Verification,
    ) -> Result<Option<Settlement>, AppError> {
        match payment.user_id {
            Some(user_id) => {
                self.enrollments()
                    .apply_verification(user_id, verification)
                    .await
            }
            None => {
                if let Some(settle) = SettlePaymentParam::from_verification(verification) {
                    PaymentRepository::new(self.db)
                        .settle(&payment.reference, settle)
                        .await?;
                }
                Ok(None)
            }
        }
    }

    /// Verifies a payment by reference and completes the linked enrollment.
    ///
    /// Settled payments are returned without contacting the gateway.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Unknown reference
    /// - `Err(AppError::AuthErr(AccessDenied))` - Caller neither owns the payment nor is admin
    pub async fn verify(&self, actor: &User, reference: &str) -> Result<PaymentVerification, AppError> {
        let payment_repo = PaymentRepository::new(self.db);
        let payment = payment_repo
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

        authorize(
            actor,
            Resource::Payment {
                owner_id: payment.user_id,
            },
            Action::Read,
        )?;

        let enrollment_repo = EnrollmentRepository::new(self.db);
        if payment.status == PaymentStatus::Pending {
            let linked = match payment.user_id {
                Some(user_id) => {
                    enrollment_repo
                        .find_by_reference_for_user(reference, user_id)
                        .await?
                }
                None => None,
            };

            match (payment.user_id, linked) {
                (Some(user_id), Some(enrollment))
                    if enrollment.payment_status == EnrollmentStatus::Pending =>
                {
                    self.enrollments()
                        .complete_after_payment(user_id, reference)
                        .await?;
                }
                _ => {
                    let verification = self.gateway.verify(reference).await?;
                    self.settle(&payment, &verification).await?;
                }
            }
        }

        let payment = payment_repo.find_by_reference(reference).await?.ok_or(
            InternalError::MissingAfterWrite {
                entity: "payment",
                id: payment.id,
            },
        )?;
        let enrollment = match payment.user_id {
            Some(user_id) => {
                enrollment_repo
                    .find_by_reference_for_user(reference, user_id)
                    .await?
            }
            None => None,
        };

        Ok(PaymentVerification {
            payment,
            enrollment,
        })
    }

    /// Gets the caller's payments, newest first.
    pub async fn user_payments(&self, user: &User) -> Result<Vec<Payment>, AppError> {
        PaymentRepository::new(self.db).get_by_user(user.id).await
    }

    /// Handles a gateway webhook delivery.
    ///
    /// The signature is an HMAC-SHA512 of the raw body keyed with the gateway secret. Events
    /// other than `charge.success`, unknown references and payments without an enrollment are
    /// acknowledged and logged.
    ///
    /// # Arguments
    /// - `secret` - Gateway secret key
    /// - `body` - Raw request body exactly as received
    /// - `signature` - Value of the `x-paystack-signature` header, if present
    ///
    /// # Returns
    /// - `Ok(())` - Event processed or deliberately ignored
    /// - `Err(PaymentError::InvalidSignature)` - Missing or mismatching signature
    /// - `Err(AppError::BadRequest)` - Authentic body that is not valid JSON
    pub async fn handle_webhook(
        &self,
        secret: &str,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<(), AppError> {
        let Some(signature) = signature else {
            return Err(PaymentError::InvalidSignature.into());
        };
        if !verify_signature(secret, body, signature) {
            return Err(PaymentError::InvalidSignature.into());
        }

        let event: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid webhook body: {}", e)))?;

        let event_type = event.get("event").and_then(Value::as_str).unwrap_or("");
        if event_type != CHARGE_SUCCESS {
            tracing::debug!("Ignoring webhook event {:?}", event_type);
            return Ok(());
        }

        let data = event.get("data").cloned().unwrap_or(Value::Null);
        let Some(reference) = data.get("reference").and_then(Value::as_str) else {
            tracing::warn!("Webhook {} without a transaction reference", CHARGE_SUCCESS);
            return Ok(());
        };

        let Some(payment) = PaymentRepository::new(self.db)
            .find_by_reference(reference)
            .await?
        else {
            tracing::warn!("Webhook for unknown payment reference {}", reference);
            return Ok(());
        };

        let verification = Verification::from_charge_success(reference, &data, event.clone());
        match self.settle(&payment, &verification).await? {
            Some(settlement) => tracing::info!(
                "Webhook settled payment {}; enrollment {} is {:?}",
                reference,
                settlement.enrollment.id,
                settlement.status
            ),
            None => tracing::info!(
                "Webhook settled payment {} with no linked enrollment",
                reference
            ),
        }

        Ok(())
    }

    /// Re-verifies payments left pending for longer than `older_than`.
    ///
    /// Failures are logged per payment and do not stop the sweep.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of payments that left `pending` during this sweep
    pub async fn reconcile_pending(&self, older_than: Duration) -> Result<usize, AppError> {
        let cutoff = Utc::now() - older_than;
        let payment_repo = PaymentRepository::new(self.db);
        let stale = payment_repo.get_stale_pending(cutoff).await?;

        let mut settled = 0;
        for payment in stale {
            let verification = match self.gateway.verify(&payment.reference).await {
                Ok(verification) => verification,
                Err(e) => {
                    tracing::warn!("Could not verify payment {}: {}", payment.reference, e);
                    continue;
                }
            };

            match self.settle(&payment, &verification).await {
                Ok(_) => {
                    let still_pending = payment_repo
                        .find_by_reference(&payment.reference)
                        .await?
                        .is_some_and(|p| {
                            p.status == PaymentStatus::Pending
                        });
                    if !still_pending {
                        settled += 1;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to settle payment {}: {}", payment.reference, e);
                }
            }
        }

        Ok(settled)
    }
}
