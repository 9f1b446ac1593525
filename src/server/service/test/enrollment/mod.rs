use crate::server::{
    error::{auth::AuthError, payment::PaymentError, AppError},
    gateway::{
        fake::{FakeGateway, InitializeOutcome},
        GatewayStatus,
    },
    mailer::recording::RecordingMailer,
    model::user::User,
    service::enrollment::EnrollmentService,
};
use entity::sea_orm_active_enums::{EnrollmentStatus, PaymentStatus};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{
    builder::TestBuilder,
    factory::{self, enrollment::EnrollmentFactory, payment::PaymentFactory},
};

mod admin;
mod complete_after_payment;
mod unenroll;

const CURRENCY: &str = "NGN";
