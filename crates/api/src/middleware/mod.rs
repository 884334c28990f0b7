//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the session from a Bearer token or `session` cookie.
//! - [`rbac::RequireEmployee`] -- requires the `employee` role.

pub mod auth;
pub mod rbac;
