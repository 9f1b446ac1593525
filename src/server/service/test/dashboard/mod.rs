use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::User,
    service::dashboard::DashboardService,
};
use entity::sea_orm_active_enums::EnrollmentStatus;
use test_utils::{
    builder::TestBuilder,
    factory::{self, enrollment::EnrollmentFactory, helpers::create_course_with_modules},
};
