//! Request authentication and authorization.
//!
//! `auth` turns a bearer token into a fresh `User` and enforces coarse permissions;
//! `policy` decides ownership-based access to individual resources.

pub mod auth;
pub mod policy;
