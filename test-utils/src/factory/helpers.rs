//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
///
/// Unique columns (email, phone number, slug, payment reference) are derived
/// from this counter so factory-created rows never collide.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates one branch of the catalog tree owned by a fresh admin.
///
/// This is a convenience method that creates:
/// 1. Admin user (course owner)
/// 2. Free course
/// 3. Module (order 1)
/// 4. Text content item
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((admin, course, module, content))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_catalog(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::course::Model,
        entity::module::Model,
        entity::content::Model,
    ),
    DbErr,
> {
    let admin = crate::factory::user::create_admin(db).await?;
    let course = crate::factory::course::create_course(db, admin.id).await?;
    let module = crate::factory::module::create_module(db, course.id).await?;
    let content = crate::factory::content::create_content(db, module.id).await?;

    Ok((admin, course, module, content))
}

/// Creates a course with `count` modules ordered 1..=count.
///
/// # Arguments
/// - `db` - Database connection
/// - `owner_id` - User id recorded as the course creator
/// - `price` - Course price, 0 for a free course
/// - `count` - Number of modules to create
///
/// # Returns
/// - `Ok((course, modules))` - Created course and its modules in order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_course_with_modules(
    db: &DatabaseConnection,
    owner_id: i32,
    price: i64,
    count: i32,
) -> Result<(entity::course::Model, Vec<entity::module::Model>), DbErr> {
    let course = crate::factory::course::CourseFactory::new(db, owner_id)
        .price(price)
        .build()
        .await?;

    let mut modules = Vec::with_capacity(count.max(0) as usize);
    for order in 1..=count {
        let module = crate::factory::module::ModuleFactory::new(db, course.id)
            .order(order)
            .build()
            .await?;
        modules.push(module);
    }

    Ok((course, modules))
}
