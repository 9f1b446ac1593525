//! API data transfer objects.
//!
//! Request and response bodies exchanged with HTTP clients. Field names are serialized
//! in camelCase; enum-valued fields travel as their lowercase string form and are parsed
//! into domain enums by the server-side parameter types.

pub mod api;
pub mod auth;
pub mod comment;
pub mod content;
pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod module;
pub mod payment;
pub mod progress;
pub mod user;
