//! Stateless helpers shared by services and middleware.

pub mod code;
pub mod jwt;
pub mod parse;
pub mod password;
pub mod signature;
pub mod slug;
pub mod validate;
