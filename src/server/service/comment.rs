//! Comments on content items: threads, edits, deletes and likes.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};

use crate::{
    model::user::UserSummaryDto,
    server::{
        data::{comment::CommentRepository, content::ContentRepository, user::UserRepository},
        error::AppError,
        middleware::policy::{authorize, Action, Resource},
        model::{
            comment::{Comment, CommentTextParam, CommentView, LikeToggle},
            pagination::{Page, PageParam},
            user::User,
        },
    },
};

pub struct CommentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a top-level comment to a content item.
    pub async fn add(
        &self,
        user: &User,
        content_id: i32,
        param: CommentTextParam,
    ) -> Result<CommentView, AppError> {
        self.require_content(content_id).await?;
        authorize(user, Resource::Comment { author_id: user.id }, Action::Create)?;

        let comment = CommentRepository::new(self.db)
            .create(user.id, content_id, None, param.text)
            .await?;

        Ok(CommentView {
            comment,
            author: user.summary(),
            reply_ids: Vec::new(),
            like_count: 0,
        })
    }

    /// Replies to a comment. The parent must belong to the same content item.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Content or parent comment does not exist
    /// - `Err(AppError::BadRequest)` - Parent comment is on a different content item
    pub async fn reply(
        &self,
        user: &User,
        content_id: i32,
        parent_id: i32,
        param: CommentTextParam,
    ) -> Result<CommentView, AppError> {
        self.require_content(content_id).await?;

        let comment_repo = CommentRepository::new(self.db);
        let parent = comment_repo
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parent comment not found".to_string()))?;
        if parent.content_id != content_id {
            return Err(AppError::BadRequest(
                "Parent comment does not belong to this content".to_string(),
            ));
        }

        let comment = comment_repo
            .create(user.id, content_id, Some(parent.id), param.text)
            .await?;

        Ok(CommentView {
            comment,
            author: user.summary(),
            reply_ids: Vec::new(),
            like_count: 0,
        })
    }

    /// Lists top-level comments on a content item, newest first.
    pub async fn list(&self, content_id: i32, page: PageParam) -> Result<Page<CommentView>, AppError> {
        self.require_content(content_id).await?;

        let comment_repo = CommentRepository::new(self.db);
        let (comments, total) = comment_repo
            .get_top_level_paginated(content_id, page)
            .await?;

        let ids: Vec<i32> = comments.iter().map(|c| c.id).collect();
        let mut replies = comment_repo.get_reply_ids(&ids).await?;
        let likes = comment_repo.get_like_counts(&ids).await?;
        let authors = self.authors(&comments).await?;

        let views = comments
            .into_iter()
            .map(|comment| CommentView {
                author: author_summary(&authors, comment.user_id),
                reply_ids: replies.remove(&comment.id).unwrap_or_default(),
                like_count: likes.get(&comment.id).copied().unwrap_or(0),
                comment,
            })
            .collect();

        Ok(Page::new(views, total, page))
    }

    /// Replaces the text of a comment. Author or admin only.
    pub async fn edit(
        &self,
        actor: &User,
        comment_id: i32,
        param: CommentTextParam,
    ) -> Result<CommentView, AppError> {
        let comment_repo = CommentRepository::new(self.db);
        let comment = self.require_comment(comment_id).await?;

        authorize(
            actor,
            Resource::Comment {
                author_id: comment.user_id,
            },
            Action::Update,
        )?;

        let updated = comment_repo
            .update_text(comment.id, param.text)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        let replies = comment_repo.get_reply_ids(&[updated.id]).await?;
        let like_count = comment_repo.count_likes(updated.id).await?;
        let authors = self.authors(std::slice::from_ref(&updated)).await?;

        Ok(CommentView {
            author: author_summary(&authors, updated.user_id),
            reply_ids: replies.get(&updated.id).cloned().unwrap_or_default(),
            like_count,
            comment: updated,
        })
    }

    /// Deletes a comment with its replies and likes. Author or admin only.
    pub async fn delete(&self, actor: &User, comment_id: i32) -> Result<(), AppError> {
        let comment = self.require_comment(comment_id).await?;

        authorize(
            actor,
            Resource::Comment {
                author_id: comment.user_id,
            },
            Action::Delete,
        )?;

        let txn = self.db.begin().await?;
        let removed = CommentRepository::new(&txn)
            .delete_with_replies(comment.id)
            .await?;
        txn.commit().await?;

        tracing::debug!("User {} deleted comment {} ({} rows)", actor.id, comment.id, removed);

        Ok(())
    }

    /// Likes a comment, or removes the caller's like if present.
    pub async fn toggle_like(&self, user: &User, comment_id: i32) -> Result<LikeToggle, AppError> {
        let comment = self.require_comment(comment_id).await?;
        let comment_repo = CommentRepository::new(self.db);

        let liked = if comment_repo.unlike(comment.id, user.id).await? {
            false
        } else {
            match comment_repo.like(comment.id, user.id).await {
                Ok(()) => true,
                // A concurrent toggle inserted the same pair first.
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    true
                }
                Err(e) => return Err(e.into()),
            }
        };

        let like_count = comment_repo.count_likes(comment.id).await?;

        Ok(LikeToggle { liked, like_count })
    }

    async fn require_content(&self, content_id: i32) -> Result<(), AppError> {
        ContentRepository::new(self.db)
            .find_by_id(content_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))
    }

    async fn require_comment(&self, comment_id: i32) -> Result<Comment, AppError> {
        CommentRepository::new(self.db)
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    async fn authors(&self, comments: &[Comment]) -> Result<HashMap<i32, User>, AppError> {
        let ids: Vec<i32> = comments.iter().map(|c| c.user_id).collect();
        Ok(UserRepository::new(self.db)
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect())
    }
}

fn author_summary(authors: &HashMap<i32, User>, user_id: i32) -> UserSummaryDto {
    authors
        .get(&user_id)
        .map(User::summary)
        .unwrap_or(UserSummaryDto {
            id: user_id,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
        })
}
