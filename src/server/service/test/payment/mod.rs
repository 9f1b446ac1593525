use crate::server::{
    data::payment::PaymentRepository,
    error::{auth::AuthError, payment::PaymentError, AppError},
    gateway::{fake::FakeGateway, GatewayStatus},
    mailer::recording::RecordingMailer,
    model::user::User,
    service::payment::PaymentService,
    util::signature::sign,
};
use entity::sea_orm_active_enums::{EnrollmentStatus, PaymentStatus};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use test_utils::{
    builder::TestBuilder,
    factory::{self, enrollment::EnrollmentFactory, payment::PaymentFactory},
};

mod handle_webhook;
mod reconcile_pending;

const CURRENCY: &str = "NGN";
const SECRET: &str = "sk_test_secret";

async fn payment_status(
    db: &sea_orm::DatabaseConnection,
    reference: &str,
) -> Result<PaymentStatus, sea_orm::DbErr> {
    let payment = entity::prelude::Payment::find()
        .filter(entity::payment::Column::Reference.eq(reference))
        .one(db)
        .await?
        .unwrap();
    Ok(payment.status)
}

async fn enrollment_status(
    db: &sea_orm::DatabaseConnection,
    reference: &str,
) -> Result<EnrollmentStatus, sea_orm::DbErr> {
    let enrollment = entity::prelude::Enrollment::find()
        .filter(entity::enrollment::Column::PaymentReference.eq(reference))
        .one(db)
        .await?
        .unwrap();
    Ok(enrollment.payment_status)
}
