//! SeaORM entities for the course platform schema.

pub mod prelude;

pub mod comment;
pub mod comment_like;
pub mod content;
pub mod course;
pub mod enrollment;
pub mod enrollment_module;
pub mod module;
pub mod payment;
pub mod sea_orm_active_enums;
pub mod user;
