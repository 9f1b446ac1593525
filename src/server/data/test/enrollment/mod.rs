use crate::server::data::enrollment::EnrollmentRepository;
use entity::sea_orm_active_enums::EnrollmentStatus;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, enrollment::EnrollmentFactory, helpers::create_course_with_modules},
};

mod delete;
mod get_by_courses;
mod settle;
