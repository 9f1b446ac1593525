//! Cross-table catalog queries: ownership resolution and subtree deletion.
//!
//! Modules and content items have no owner column of their own; the owner is the creator of
//! the root course. `resolve_owner` walks Content → Module → Course once so authorization can
//! be decided against a single user id. The `delete_*` functions remove a catalog subtree and
//! every row hanging off it (completions, enrollments, comments, likes); callers run them inside
//! a transaction.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};

use crate::server::data::{content::ContentRepository, module::ModuleRepository};

/// A node of the course tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogNode {
    Course(i32),
    Module(i32),
    Content(i32),
}

/// Owner and root course of a catalog node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOwner {
    pub course_id: i32,
    pub owner_id: i32,
}

pub struct CatalogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CatalogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Resolves the root course and its creator for any catalog node.
    ///
    /// # Returns
    /// - `Ok(Some(CatalogOwner))` - Node exists
    /// - `Ok(None)` - Node, or one of its ancestors, does not exist
    /// - `Err(DbErr)` - Database error during lookup
    pub async fn resolve_owner(&self, node: CatalogNode) -> Result<Option<CatalogOwner>, DbErr> {
        let course_id = match node {
            CatalogNode::Course(course_id) => Some(course_id),
            CatalogNode::Module(module_id) => self.course_of_module(module_id).await?,
            CatalogNode::Content(content_id) => {
                let module_id: Option<i32> = entity::prelude::Content::find_by_id(content_id)
                    .select_only()
                    .column(entity::content::Column::ModuleId)
                    .into_tuple()
                    .one(self.db)
                    .await?;
                match module_id {
                    Some(module_id) => self.course_of_module(module_id).await?,
                    None => None,
                }
            }
        };

        let Some(course_id) = course_id else {
            return Ok(None);
        };

        let owner_id: Option<i32> = entity::prelude::Course::find_by_id(course_id)
            .select_only()
            .column(entity::course::Column::CreatedBy)
            .into_tuple()
            .one(self.db)
            .await?;

        Ok(owner_id.map(|owner_id| CatalogOwner {
            course_id,
            owner_id,
        }))
    }

    /// Deletes the given courses with their modules, content, enrollments, completions,
    /// comments and likes.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of course rows deleted
    pub async fn delete_courses(&self, course_ids: &[i32]) -> Result<u64, DbErr> {
        if course_ids.is_empty() {
            return Ok(0);
        }

        let module_ids = ModuleRepository::new(self.db)
            .get_ids_by_courses(course_ids)
            .await?;
        self.delete_module_rows(&module_ids).await?;

        let enrollment_ids: Vec<i32> = entity::prelude::Enrollment::find()
            .select_only()
            .column(entity::enrollment::Column::Id)
            .filter(entity::enrollment::Column::CourseId.is_in(course_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;
        delete_enrollments(self.db, &enrollment_ids).await?;

        let result = entity::prelude::Course::delete_many()
            .filter(entity::course::Column::Id.is_in(course_ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a module with its content, completions, comments and likes.
    pub async fn delete_module(&self, module_id: i32) -> Result<u64, DbErr> {
        self.delete_module_rows(&[module_id]).await
    }

    /// Deletes a content item with its comments and likes.
    pub async fn delete_content(&self, content_id: i32) -> Result<u64, DbErr> {
        delete_comments_on_contents(self.db, &[content_id]).await?;

        let result = entity::prelude::Content::delete_by_id(content_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete_module_rows(&self, module_ids: &[i32]) -> Result<u64, DbErr> {
        if module_ids.is_empty() {
            return Ok(0);
        }

        let content_ids = ContentRepository::new(self.db)
            .get_ids_by_modules(module_ids)
            .await?;
        delete_comments_on_contents(self.db, &content_ids).await?;

        entity::prelude::Content::delete_many()
            .filter(entity::content::Column::ModuleId.is_in(module_ids.to_vec()))
            .exec(self.db)
            .await?;

        entity::prelude::EnrollmentModule::delete_many()
            .filter(entity::enrollment_module::Column::ModuleId.is_in(module_ids.to_vec()))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Module::delete_many()
            .filter(entity::module::Column::Id.is_in(module_ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn course_of_module(&self, module_id: i32) -> Result<Option<i32>, DbErr> {
        entity::prelude::Module::find_by_id(module_id)
            .select_only()
            .column(entity::module::Column::CourseId)
            .into_tuple()
            .one(self.db)
            .await
    }
}

/// Deletes enrollments and their completed-module rows.
pub async fn delete_enrollments<C: ConnectionTrait>(
    db: &C,
    enrollment_ids: &[i32],
) -> Result<u64, DbErr> {
    if enrollment_ids.is_empty() {
        return Ok(0);
    }

    entity::prelude::EnrollmentModule::delete_many()
        .filter(entity::enrollment_module::Column::EnrollmentId.is_in(enrollment_ids.to_vec()))
        .exec(db)
        .await?;

    let result = entity::prelude::Enrollment::delete_many()
        .filter(entity::enrollment::Column::Id.is_in(enrollment_ids.to_vec()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

async fn delete_comments_on_contents<C: ConnectionTrait>(
    db: &C,
    content_ids: &[i32],
) -> Result<(), DbErr> {
    if content_ids.is_empty() {
        return Ok(());
    }

    let comment_ids: Vec<i32> = entity::prelude::Comment::find()
        .select_only()
        .column(entity::comment::Column::Id)
        .filter(entity::comment::Column::ContentId.is_in(content_ids.to_vec()))
        .into_tuple()
        .all(db)
        .await?;

    crate::server::data::comment::delete_comment_rows(db, &comment_ids).await
}
