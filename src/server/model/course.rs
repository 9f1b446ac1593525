//! Course domain models and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::CourseLevel;
use sea_orm::ActiveEnum;
use validator::Validate;

use crate::{
    model::course::{
        CourseDetailDto, CourseDto, CourseGroupDto, CourseSummaryDto, CreateCourseDto,
        UpdateCourseDto,
    },
    server::{
        error::AppError,
        model::module::Module,
        util::parse::parse_course_level,
    },
};

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "none";

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    /// Major currency units; zero means free.
    pub price: i64,
    pub duration: String,
    pub level: CourseLevel,
    /// Admin who owns the course and everything below it.
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    pub fn from_entity(entity: entity::course::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            description: entity.description,
            category: entity.category,
            price: entity.price,
            duration: entity.duration,
            level: entity.level,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CourseDto {
        CourseDto {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            category: self.category,
            price: self.price,
            duration: self.duration,
            level: self.level.to_value(),
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn summary(&self) -> CourseSummaryDto {
        CourseSummaryDto {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            category: self.category.clone(),
            level: self.level.to_value(),
            price: self.price,
            duration: self.duration.clone(),
        }
    }
}

/// A course with its modules in display order.
#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub course: Course,
    pub modules: Vec<Module>,
}

impl CourseDetail {
    pub fn into_dto(self) -> CourseDetailDto {
        CourseDetailDto {
            course: self.course.into_dto(),
            modules: self.modules.into_iter().map(Module::into_dto).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCourseParam {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: i64,
    pub duration: String,
    pub level: CourseLevel,
}

impl CreateCourseParam {
    /// Validates a new course.
    ///
    /// # Returns
    /// - `Ok(CreateCourseParam)` - Valid; category defaults to `none` and price to 0
    /// - `Err(AppError::BadRequest)` - Title, description, duration, level or price invalid
    pub fn from_dto(dto: CreateCourseDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            category: normalize_category(dto.category),
            price: dto.price.unwrap_or(0),
            duration: dto.duration.trim().to_string(),
            level: parse_course_level(&dto.level)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCourseParam {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub duration: Option<String>,
    pub level: Option<CourseLevel>,
}

impl UpdateCourseParam {
    pub fn from_dto(dto: UpdateCourseDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            title: dto.title.map(|v| v.trim().to_string()),
            description: dto.description.map(|v| v.trim().to_string()),
            category: dto.category.map(|c| normalize_category(Some(c))),
            price: dto.price,
            duration: dto.duration.map(|v| v.trim().to_string()),
            level: dto.level.map(|v| parse_course_level(&v)).transpose()?,
        })
    }
}

/// Courses sharing a grouping key.
#[derive(Debug, Clone)]
pub struct CourseGroup {
    pub key: String,
    pub courses: Vec<Course>,
}

impl CourseGroup {
    pub fn into_dto(self) -> CourseGroupDto {
        CourseGroupDto {
            key: self.key,
            courses: self.courses.into_iter().map(Course::into_dto).collect(),
        }
    }
}

fn normalize_category(category: Option<String>) -> String {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}
