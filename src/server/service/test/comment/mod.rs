use crate::server::{
    error::{auth::AuthError, AppError},
    model::{comment::CommentTextParam, pagination::PageParam, user::User},
    service::comment::CommentService,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, comment::CommentFactory, helpers::create_catalog},
};

mod delete;
mod edit;
mod list;
mod reply;
mod toggle_like;

fn text(value: &str) -> CommentTextParam {
    CommentTextParam {
        text: value.to_string(),
    }
}
