//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token generation and validation.
//!
//! Tokens are issued by the guild's account service; this server only
//! verifies them.

pub mod jwt;
