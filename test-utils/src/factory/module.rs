//! Module factory for creating test course module entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test modules with customizable fields.
pub struct ModuleFactory<'a> {
    db: &'a DatabaseConnection,
    course_id: i32,
    title: String,
    order: i32,
}

impl<'a> ModuleFactory<'a> {
    /// Creates a new ModuleFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Module {id}"`
    /// - order: `1`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `course_id` - Course the module belongs to
    pub fn new(db: &'a DatabaseConnection, course_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            course_id,
            title: format!("Module {}", id),
            order: 1,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Builds and inserts the module entity into the database.
    pub async fn build(self) -> Result<entity::module::Model, DbErr> {
        let now = Utc::now();
        entity::module::ActiveModel {
            course_id: ActiveValue::Set(self.course_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set("A module created for testing".to_string()),
            order: ActiveValue::Set(self.order),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a module with default values in `course_id`.
pub async fn create_module(
    db: &DatabaseConnection,
    course_id: i32,
) -> Result<entity::module::Model, DbErr> {
    ModuleFactory::new(db, course_id).build().await
}
