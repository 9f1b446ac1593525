//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and into DTOs
//! at the controller boundary. Parameter types are built from request DTOs with `from_dto`,
//! which is where request validation happens.

pub mod auth;
pub mod comment;
pub mod content;
pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod module;
pub mod pagination;
pub mod payment;
pub mod progress;
pub mod user;
