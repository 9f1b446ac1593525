//! HTTP request handlers.
//!
//! Controllers authenticate the caller, convert request DTOs into validated parameters, call
//! one service and wrap the result in the success envelope. Ownership decisions are left to
//! the services.

pub mod admin;
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
