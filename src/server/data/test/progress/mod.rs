use crate::server::data::progress::ProgressRepository;
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers::create_course_with_modules},
};
