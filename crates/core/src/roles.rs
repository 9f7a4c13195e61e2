//! Well-known role name constants.
//!
//! These must match the `users_role_check` constraint in the initial migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";
