use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::user::UserSummaryDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CommentTextDto {
    #[validate(
        length(max = 2000, message = "cannot exceed 2000 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i32,
    pub content_id: i32,
    pub parent_id: Option<i32>,
    pub text: String,
    pub author: UserSummaryDto,
    pub replies: Vec<i32>,
    pub reply_count: u64,
    pub like_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageDto {
    pub comments: Vec<CommentDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggleDto {
    pub liked: bool,
    pub like_count: u64,
}
