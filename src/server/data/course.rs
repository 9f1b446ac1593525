//! Course data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    course::{Course, CreateCourseParam, UpdateCourseParam},
    pagination::PageParam,
};

pub struct CourseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CourseRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a course owned by `created_by` under the given, already unique, slug.
    ///
    /// # Returns
    /// - `Ok(Course)` - The created course
    /// - `Err(DbErr)` - Insert failed; a concurrent insert with the same slug surfaces as a
    ///   unique constraint violation
    pub async fn create(
        &self,
        param: CreateCourseParam,
        slug: String,
        created_by: i32,
    ) -> Result<Course, DbErr> {
        let now = Utc::now();

        let entity = entity::course::ActiveModel {
            title: ActiveValue::Set(param.title),
            slug: ActiveValue::Set(slug),
            description: ActiveValue::Set(param.description),
            category: ActiveValue::Set(param.category),
            price: ActiveValue::Set(param.price),
            duration: ActiveValue::Set(param.duration),
            level: ActiveValue::Set(param.level),
            created_by: ActiveValue::Set(created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Course::from_entity(entity))
    }

    pub async fn find_by_id(&self, course_id: i32) -> Result<Option<Course>, DbErr> {
        let entity = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Course::from_entity))
    }

    pub async fn find_by_ids(&self, course_ids: &[i32]) -> Result<Vec<Course>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::Id.is_in(course_ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Course::from_entity).collect())
    }

    /// Checks whether `slug` is used by a course other than `except`.
    pub async fn slug_exists(&self, slug: &str, except: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Course::find().filter(entity::course::Column::Slug.eq(slug));
        if let Some(course_id) = except {
            query = query.filter(entity::course::Column::Id.ne(course_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets courses with pagination, newest first.
    ///
    /// # Returns
    /// - `Ok((courses, total))` - Courses on the requested page and the total course count
    pub async fn get_paginated(&self, page: PageParam) -> Result<(Vec<Course>, u64), DbErr> {
        let paginator = entity::prelude::Course::find()
            .order_by_desc(entity::course::Column::CreatedAt)
            .order_by_desc(entity::course::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;

        Ok((entities.into_iter().map(Course::from_entity).collect(), total))
    }

    /// Gets every course ordered by title, for grouped listings.
    pub async fn get_all(&self) -> Result<Vec<Course>, DbErr> {
        let entities = entity::prelude::Course::find()
            .order_by_asc(entity::course::Column::Title)
            .order_by_asc(entity::course::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Course::from_entity).collect())
    }

    /// Gets the courses created by `owner_id`, newest first.
    pub async fn get_by_owner(&self, owner_id: i32) -> Result<Vec<Course>, DbErr> {
        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::CreatedBy.eq(owner_id))
            .order_by_desc(entity::course::Column::CreatedAt)
            .order_by_desc(entity::course::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Course::from_entity).collect())
    }

    pub async fn get_ids_by_owner(&self, owner_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Course::find()
            .select_only()
            .column(entity::course::Column::Id)
            .filter(entity::course::Column::CreatedBy.eq(owner_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Applies an update. `slug` is passed when the title changed.
    ///
    /// # Returns
    /// - `Ok(Some(Course))` - Updated course
    /// - `Ok(None)` - No course with that id
    pub async fn update(
        &self,
        course_id: i32,
        param: UpdateCourseParam,
        slug: Option<String>,
    ) -> Result<Option<Course>, DbErr> {
        let Some(entity) = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: entity::course::ActiveModel = entity.into();
        if let Some(title) = param.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(slug) = slug {
            model.slug = ActiveValue::Set(slug);
        }
        if let Some(description) = param.description {
            model.description = ActiveValue::Set(description);
        }
        if let Some(category) = param.category {
            model.category = ActiveValue::Set(category);
        }
        if let Some(price) = param.price {
            model.price = ActiveValue::Set(price);
        }
        if let Some(duration) = param.duration {
            model.duration = ActiveValue::Set(duration);
        }
        if let Some(level) = param.level {
            model.level = ActiveValue::Set(level);
        }
        model.updated_at = ActiveValue::Set(Utc::now());

        let updated = model.update(self.db).await?;
        Ok(Some(Course::from_entity(updated)))
    }
}
