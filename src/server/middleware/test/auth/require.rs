use super::*;

mod require_token;
mod require_verified;
