use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::User,
    service::progress::ProgressService,
};
use test_utils::{
    builder::TestBuilder,
    factory::{self, enrollment::EnrollmentFactory, helpers::create_course_with_modules},
};

mod course_progress;
mod mark_module_complete;
