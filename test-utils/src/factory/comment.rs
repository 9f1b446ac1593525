//! Comment factory for creating test comments and likes.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test comments.
pub struct CommentFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    content_id: i32,
    parent_id: Option<i32>,
    text: String,
}

impl<'a> CommentFactory<'a> {
    /// Creates a new top-level comment factory with text `"Comment {id}"`.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, content_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            content_id,
            parent_id: None,
            text: format!("Comment {}", id),
        }
    }

    /// Makes the comment a reply to `parent_id`.
    pub fn reply_to(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builds and inserts the comment entity into the database.
    pub async fn build(self) -> Result<entity::comment::Model, DbErr> {
        let now = Utc::now();
        entity::comment::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            content_id: ActiveValue::Set(self.content_id),
            parent_id: ActiveValue::Set(self.parent_id),
            text: ActiveValue::Set(self.text),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a top-level comment by `user_id` on `content_id`.
pub async fn create_comment(
    db: &DatabaseConnection,
    user_id: i32,
    content_id: i32,
) -> Result<entity::comment::Model, DbErr> {
    CommentFactory::new(db, user_id, content_id).build().await
}

/// Records a like of `comment_id` by `user_id`.
pub async fn like_comment(
    db: &DatabaseConnection,
    comment_id: i32,
    user_id: i32,
) -> Result<entity::comment_like::Model, DbErr> {
    entity::comment_like::ActiveModel {
        comment_id: ActiveValue::Set(comment_id),
        user_id: ActiveValue::Set(user_id),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
