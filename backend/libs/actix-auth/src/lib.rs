//! Shared authentication glue for the marketplace services
//!
//! - `jwt`: RS256 token validation (and generation for test fixtures)
//! - `middleware`: actix-web middleware exposing the `UserId` and `Groups`
//!   extractors services build their permission checks on

pub mod jwt;
pub mod middleware;

pub use middleware::{Groups, JwtAuthMiddleware, UserId};
