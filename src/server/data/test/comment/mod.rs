use crate::server::{data::comment::CommentRepository, model::pagination::PageParam};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, comment::CommentFactory, helpers::create_catalog},
};

mod like;
