//! Business rules of the platform.
//!
//! Services take domain models and validated parameter types from the controllers, apply the
//! access policy, and coordinate repositories, the payment gateway and the mailer. Multi-row
//! changes such as cascading deletes and payment settlement run inside one transaction here,
//! never in a controller.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod comment;
pub mod content;
pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod module;
pub mod notification;
pub mod payment;
pub mod progress;
pub mod user;

#[cfg(test)]
mod test;
