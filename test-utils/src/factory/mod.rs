//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories take the ids of the rows they depend on, so
//! create parents first (or use the helpers, which do it for you).
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let admin = factory::user::UserFactory::new(&db).admin(true).build().await?;
//!     let course = factory::course::create_course(&db, admin.id).await?;
//!
//!     // Create a whole catalog branch at once
//!     let (admin, course, module, content) = factory::helpers::create_catalog(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `course` - Create course entities
//! - `module` - Create course module entities
//! - `content` - Create module content entities
//! - `enrollment` - Create enrollment entities and completed-module rows
//! - `payment` - Create payment entities
//! - `comment` - Create comment entities and likes
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod comment;
pub mod content;
pub mod course;
pub mod enrollment;
pub mod helpers;
pub mod module;
pub mod payment;
pub mod user;

// Re-export commonly used factory functions for concise usage
pub use comment::create_comment;
pub use content::create_content;
pub use course::create_course;
pub use enrollment::create_enrollment;
pub use module::create_module;
pub use payment::create_payment;
pub use user::{create_admin, create_user};
