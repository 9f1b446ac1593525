//! Course factory for creating test course entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::CourseLevel;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test courses with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::course::CourseFactory;
///
/// let course = CourseFactory::new(&db, admin.id)
///     .title("Rust 101")
///     .price(5000)
///     .build()
///     .await?;
/// ```
pub struct CourseFactory<'a> {
    db: &'a DatabaseConnection,
    created_by: i32,
    title: String,
    slug: String,
    category: String,
    price: i64,
    level: CourseLevel,
}

impl<'a> CourseFactory<'a> {
    /// Creates a new CourseFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Course {id}"`, slug `"course-{id}"`
    /// - category: `"none"`
    /// - price: `0` (free)
    /// - level: `beginner`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `created_by` - Id of the owning admin
    ///
    /// # Returns
    /// - `CourseFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, created_by: i32) -> Self {
        let id = next_id();
        Self {
            db,
            created_by,
            title: format!("Course {}", id),
            slug: format!("course-{}", id),
            category: "none".to_string(),
            price: 0,
            level: CourseLevel::Beginner,
        }
    }

    /// Sets the title. The slug is left untouched.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the price in major currency units; `0` makes the course free.
    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    pub fn level(mut self, level: CourseLevel) -> Self {
        self.level = level;
        self
    }

    /// Builds and inserts the course entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::course::Model)` - Created course entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::course::Model, DbErr> {
        let now = Utc::now();
        entity::course::ActiveModel {
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set("A course created for testing".to_string()),
            category: ActiveValue::Set(self.category),
            price: ActiveValue::Set(self.price),
            duration: ActiveValue::Set("4 weeks".to_string()),
            level: ActiveValue::Set(self.level),
            created_by: ActiveValue::Set(self.created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a free course owned by `created_by`.
///
/// Shorthand for `CourseFactory::new(db, created_by).build().await`.
pub async fn create_course(
    db: &DatabaseConnection,
    created_by: i32,
) -> Result<entity::course::Model, DbErr> {
    CourseFactory::new(db, created_by).build().await
}

/// Creates a paid course owned by `created_by`.
pub async fn create_paid_course(
    db: &DatabaseConnection,
    created_by: i32,
    price: i64,
) -> Result<entity::course::Model, DbErr> {
    CourseFactory::new(db, created_by).price(price).build().await
}
