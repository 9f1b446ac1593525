//! Comment and comment-like data repository.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{comment::Comment, pagination::PageParam};

pub struct CommentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a comment, or a reply when `parent_id` is set.
    pub async fn create(
        &self,
        user_id: i32,
        content_id: i32,
        parent_id: Option<i32>,
        text: String,
    ) -> Result<Comment, DbErr> {
        let now = Utc::now();

        let entity = entity::comment::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            content_id: ActiveValue::Set(content_id),
            parent_id: ActiveValue::Set(parent_id),
            text: ActiveValue::Set(text),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Comment::from_entity(entity))
    }

    pub async fn find_by_id(&self, comment_id: i32) -> Result<Option<Comment>, DbErr> {
        let entity = entity::prelude::Comment::find_by_id(comment_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Comment::from_entity))
    }

    /// Gets top-level comments on a content item, newest first.
    ///
    /// # Returns
    /// - `Ok((comments, total))` - Comments on the requested page and the total count of
    ///   top-level comments on the content item
    pub async fn get_top_level_paginated(
        &self,
        content_id: i32,
        page: PageParam,
    ) -> Result<(Vec<Comment>, u64), DbErr> {
        let paginator = entity::prelude::Comment::find()
            .filter(entity::comment::Column::ContentId.eq(content_id))
            .filter(entity::comment::Column::ParentId.is_null())
            .order_by_desc(entity::comment::Column::CreatedAt)
            .order_by_desc(entity::comment::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;

        Ok((entities.into_iter().map(Comment::from_entity).collect(), total))
    }

    /// Reply ids grouped by parent, oldest reply first.
    pub async fn get_reply_ids(&self, parent_ids: &[i32]) -> Result<HashMap<i32, Vec<i32>>, DbErr> {
        if parent_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, Option<i32>)> = entity::prelude::Comment::find()
            .select_only()
            .column(entity::comment::Column::Id)
            .column(entity::comment::Column::ParentId)
            .filter(entity::comment::Column::ParentId.is_in(parent_ids.to_vec()))
            .order_by_asc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .into_tuple()
            .all(self.db)
            .await?;

        let mut replies: HashMap<i32, Vec<i32>> = HashMap::new();
        for (id, parent_id) in rows {
            if let Some(parent_id) = parent_id {
                replies.entry(parent_id).or_default().push(id);
            }
        }

        Ok(replies)
    }

    /// Like counts for each comment in `comment_ids`; comments without likes are absent.
    pub async fn get_like_counts(&self, comment_ids: &[i32]) -> Result<HashMap<i32, u64>, DbErr> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<i32> = entity::prelude::CommentLike::find()
            .select_only()
            .column(entity::comment_like::Column::CommentId)
            .filter(entity::comment_like::Column::CommentId.is_in(comment_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for comment_id in rows {
            *counts.entry(comment_id).or_default() += 1;
        }

        Ok(counts)
    }

    pub async fn update_text(&self, comment_id: i32, text: String) -> Result<Option<Comment>, DbErr> {
        let Some(entity) = entity::prelude::Comment::find_by_id(comment_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: entity::comment::ActiveModel = entity.into();
        model.text = ActiveValue::Set(text);
        model.updated_at = ActiveValue::Set(Utc::now());

        let updated = model.update(self.db).await?;
        Ok(Some(Comment::from_entity(updated)))
    }

    /// Deletes a comment together with its replies at any depth and all their likes.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of comment rows deleted, replies included
    pub async fn delete_with_replies(&self, comment_id: i32) -> Result<u64, DbErr> {
        let ids = self.collect_threads(vec![comment_id]).await?;

        let count = ids.len() as u64;
        delete_comment_rows(self.db, &ids).await?;
        Ok(count)
    }

    /// Expands `roots` with every reply beneath them.
    async fn collect_threads(&self, roots: Vec<i32>) -> Result<Vec<i32>, DbErr> {
        let mut ids = roots.clone();
        let mut frontier = roots;

        while !frontier.is_empty() {
            let children: Vec<i32> = entity::prelude::Comment::find()
                .select_only()
                .column(entity::comment::Column::Id)
                .filter(entity::comment::Column::ParentId.is_in(frontier))
                .into_tuple()
                .all(self.db)
                .await?;

            ids.extend(children.iter().copied());
            frontier = children;
        }

        Ok(ids)
    }

    /// Deletes every comment written by a user, the replies beneath them and all their likes,
    /// plus every like the user gave.
    pub async fn delete_by_user(&self, user_id: i32) -> Result<(), DbErr> {
        let authored = self.get_ids_by_user(user_id).await?;
        let ids = self.collect_threads(authored).await?;

        delete_comment_rows(self.db, &ids).await?;

        entity::prelude::CommentLike::delete_many()
            .filter(entity::comment_like::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn get_ids_by_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Comment::find()
            .select_only()
            .column(entity::comment::Column::Id)
            .filter(entity::comment::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn count_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Comment::find()
            .filter(entity::comment::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Comment::find().count(self.db).await
    }

    /// Likes received on all comments written by `user_id`.
    pub async fn count_likes_received(&self, user_id: i32) -> Result<u64, DbErr> {
        let authored = self.get_ids_by_user(user_id).await?;
        if authored.is_empty() {
            return Ok(0);
        }

        entity::prelude::CommentLike::find()
            .filter(entity::comment_like::Column::CommentId.is_in(authored))
            .count(self.db)
            .await
    }

    /// Most recent comments across all content items, newest first.
    pub async fn get_recent(&self, limit: u64) -> Result<Vec<Comment>, DbErr> {
        let entities = entity::prelude::Comment::find()
            .order_by_desc(entity::comment::Column::CreatedAt)
            .order_by_desc(entity::comment::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Comment::from_entity).collect())
    }

    /// Removes a like.
    ///
    /// # Returns
    /// - `Ok(true)` - The like existed and was removed
    /// - `Ok(false)` - There was no like to remove
    pub async fn unlike(&self, comment_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CommentLike::delete_by_id((comment_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Adds a like. A duplicate pair fails with a unique constraint violation.
    pub async fn like(&self, comment_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::comment_like::ActiveModel {
            comment_id: ActiveValue::Set(comment_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn count_likes(&self, comment_id: i32) -> Result<u64, DbErr> {
        entity::prelude::CommentLike::find()
            .filter(entity::comment_like::Column::CommentId.eq(comment_id))
            .count(self.db)
            .await
    }
}

/// Deletes the likes of `comment_ids` and then the comments themselves, replies first.
pub async fn delete_comment_rows<C: ConnectionTrait>(db: &C, comment_ids: &[i32]) -> Result<(), DbErr> {
    if comment_ids.is_empty() {
        return Ok(());
    }

    entity::prelude::CommentLike::delete_many()
        .filter(entity::comment_like::Column::CommentId.is_in(comment_ids.to_vec()))
        .exec(db)
        .await?;

    entity::prelude::Comment::delete_many()
        .filter(entity::comment::Column::Id.is_in(comment_ids.to_vec()))
        .filter(entity::comment::Column::ParentId.is_not_null())
        .exec(db)
        .await?;

    entity::prelude::Comment::delete_many()
        .filter(entity::comment::Column::Id.is_in(comment_ids.to_vec()))
        .exec(db)
        .await?;

    Ok(())
}
