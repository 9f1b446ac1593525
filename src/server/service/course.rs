//! Course catalog service.
//!
//! Courses are owned by the admin who created them. Slugs are derived from the title and
//! made unique with a numeric suffix.

use std::collections::BTreeMap;

use entity::sea_orm_active_enums::CourseLevel;
use sea_orm::{ActiveEnum, DatabaseConnection, Iterable, TransactionTrait};

use crate::server::{
    data::{catalog::CatalogRepository, course::CourseRepository, module::ModuleRepository},
    error::AppError,
    middleware::policy::{authorize, Action, Resource},
    model::{
        course::{Course, CourseDetail, CourseGroup, CreateCourseParam, UpdateCourseParam},
        pagination::{Page, PageParam},
        user::User,
    },
    util::slug::{slugify, with_suffix},
};

/// Give up looking for a free slug after this many suffixes.
const MAX_SLUG_ATTEMPTS: u32 = 100;

pub struct CourseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a course owned by `actor`.
    ///
    /// # Returns
    /// - `Ok(Course)` - Created course with its unique slug
    /// - `Err(AppError::AuthErr(AccessDenied))` - Caller is not an admin
    pub async fn create(&self, actor: &User, param: CreateCourseParam) -> Result<Course, AppError> {
        authorize(actor, Resource::Catalog { owner_id: actor.id }, Action::Create)?;

        let slug = self.unique_slug(&param.title, None).await?;
        let course = CourseRepository::new(self.db)
            .create(param, slug, actor.id)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, "A course with this slug already exists"))?;

        tracing::info!("Admin {} created course {} ({})", actor.id, course.id, course.slug);

        Ok(course)
    }

    /// Gets a page of courses, newest first.
    pub async fn get_paginated(&self, page: PageParam) -> Result<Page<Course>, AppError> {
        let (courses, total) = CourseRepository::new(self.db).get_paginated(page).await?;
        Ok(Page::new(courses, total, page))
    }

    /// Gets a course with its modules in display order.
    pub async fn get_by_id(&self, course_id: i32) -> Result<CourseDetail, AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
        let modules = ModuleRepository::new(self.db)
            .get_by_course(course.id)
            .await?;

        Ok(CourseDetail { course, modules })
    }

    /// Updates a course owned by `actor`. A new title regenerates the slug.
    pub async fn update(
        &self,
        actor: &User,
        course_id: i32,
        param: UpdateCourseParam,
    ) -> Result<Course, AppError> {
        let course_repo = CourseRepository::new(self.db);
        let course = course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        authorize(
            actor,
            Resource::Catalog {
                owner_id: course.created_by,
            },
            Action::Update,
        )?;

        let slug = match &param.title {
            Some(title) if *title != course.title => {
                Some(self.unique_slug(title, Some(course.id)).await?)
            }
            _ => None,
        };

        course_repo
            .update(course.id, param, slug)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, "A course with this slug already exists"))?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    /// Deletes a course with its modules, contents, comments and enrollments.
    pub async fn delete(&self, actor: &User, course_id: i32) -> Result<(), AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        authorize(
            actor,
            Resource::Catalog {
                owner_id: course.created_by,
            },
            Action::Delete,
        )?;

        let txn = self.db.begin().await?;
        CatalogRepository::new(&txn)
            .delete_courses(&[course.id])
            .await?;
        txn.commit().await?;

        tracing::info!("Admin {} deleted course {}", actor.id, course.id);

        Ok(())
    }

    /// Groups all courses by category, categories sorted alphabetically.
    pub async fn grouped_by_category(&self) -> Result<Vec<CourseGroup>, AppError> {
        let courses = CourseRepository::new(self.db).get_all().await?;

        let mut groups: BTreeMap<String, Vec<Course>> = BTreeMap::new();
        for course in courses {
            groups.entry(course.category.clone()).or_default().push(course);
        }

        Ok(groups
            .into_iter()
            .map(|(key, courses)| CourseGroup { key, courses })
            .collect())
    }

    /// Groups all courses by level, from beginner to advanced. Empty levels are omitted.
    pub async fn grouped_by_level(&self) -> Result<Vec<CourseGroup>, AppError> {
        let courses = CourseRepository::new(self.db).get_all().await?;

        Ok(CourseLevel::iter()
            .filter_map(|level| {
                let courses: Vec<Course> = courses
                    .iter()
                    .filter(|course| course.level == level)
                    .cloned()
                    .collect();
                (!courses.is_empty()).then(|| CourseGroup {
                    key: level.to_value(),
                    courses,
                })
            })
            .collect())
    }

    /// Splits all courses into free and paid.
    ///
    /// # Returns
    /// - `Ok((free, paid))`
    pub async fn grouped_by_price(&self) -> Result<(Vec<Course>, Vec<Course>), AppError> {
        let courses = CourseRepository::new(self.db).get_all().await?;
        Ok(courses.into_iter().partition(Course::is_free))
    }

    async fn unique_slug(&self, title: &str, except: Option<i32>) -> Result<String, AppError> {
        let course_repo = CourseRepository::new(self.db);
        let base = slugify(title);

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let candidate = with_suffix(&base, attempt);
            if !course_repo.slug_exists(&candidate, except).await? {
                return Ok(candidate);
            }
        }

        Err(AppError::Conflict(format!(
            "Too many courses share the slug {}",
            base
        )))
    }
}
