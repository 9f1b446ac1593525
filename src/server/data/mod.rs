//! Database repository layer for all domain entities.
//!
//! Repositories wrap SeaORM queries for one aggregate each and convert entity models into
//! domain models at the boundary. They are generic over `ConnectionTrait` so services can run
//! several repository calls inside one transaction.

pub mod catalog;
pub mod comment;
pub mod content;
pub mod course;
pub mod enrollment;
pub mod module;
pub mod payment;
pub mod progress;
pub mod user;
