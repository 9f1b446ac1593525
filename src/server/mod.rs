//! HTTP backend of the learning platform.
//!
//! Axum serves the JSON API, SeaORM talks to SQLite and Paystack settles paid enrollments.
//!
//! # Layers
//!
//! - `controller/` - Handlers: authenticate, turn DTOs into params, call a service, wrap the
//!   result in the response envelope
//! - `service/` - Business rules, access policy and transactions
//! - `data/` - Repositories over SeaORM entities, returning domain models
//! - `model/` - Domain models and validated parameter types
//! - `middleware/` - Bearer token guard and the central authorization policy
//! - `error/` - `AppError` and its mapping onto status codes
//!
//! # Infrastructure
//!
//! - `config` - Environment configuration
//! - `state` - `AppState` handed to every handler
//! - `startup` - Tracing, migrations, payment gateway, admin bootstrap code
//! - `router` - Route table, OpenAPI document and Swagger UI
//! - `scheduler/` - Reconciliation of checkouts whose webhook never arrived
//! - `gateway/` - `PaymentGateway` trait and the Paystack client
//! - `mailer` - `Mailer` trait and the logging mailer
//!
//! A request passes router → guard → controller → service → repository and the domain model
//! travels back up, becoming a DTO only in the controller.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod gateway;
pub mod mailer;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
