//! Comment domain models and parameters.

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    model::{
        comment::{CommentDto, CommentPageDto, CommentTextDto, LikeToggleDto},
        user::UserSummaryDto,
    },
    server::{error::AppError, model::pagination::Page},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i32,
    pub user_id: i32,
    pub content_id: i32,
    /// Set for replies.
    pub parent_id: Option<i32>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn from_entity(entity: entity::comment::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            content_id: entity.content_id,
            parent_id: entity.parent_id,
            text: entity.text,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A comment with its author and engagement counts, as listed under a content item.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author: UserSummaryDto,
    pub reply_ids: Vec<i32>,
    pub like_count: u64,
}

impl CommentView {
    pub fn into_dto(self) -> CommentDto {
        CommentDto {
            id: self.comment.id,
            content_id: self.comment.content_id,
            parent_id: self.comment.parent_id,
            text: self.comment.text,
            author: self.author,
            reply_count: self.reply_ids.len() as u64,
            replies: self.reply_ids,
            like_count: self.like_count,
            created_at: self.comment.created_at,
            updated_at: self.comment.updated_at,
        }
    }
}

impl Page<CommentView> {
    pub fn into_comment_page_dto(self) -> CommentPageDto {
        let total_pages = self.total_pages();
        CommentPageDto {
            comments: self.items.into_iter().map(CommentView::into_dto).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages,
        }
    }
}

/// Validated comment body.
#[derive(Debug, Clone)]
pub struct CommentTextParam {
    pub text: String,
}

impl CommentTextParam {
    pub fn from_dto(dto: CommentTextDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            text: dto.text.trim().to_string(),
        })
    }
}

/// Outcome of toggling a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: u64,
}

impl LikeToggle {
    pub fn into_dto(self) -> LikeToggleDto {
        LikeToggleDto {
            liked: self.liked,
            like_count: self.like_count,
        }
    }
}
