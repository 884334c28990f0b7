//! Well-known role name constants.
//!
//! These must match the `ck_logins_role` check constraint in
//! `20250301000004_create_auth_tables.sql`.

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_EMPLOYEE: &str = "employee";

/// Returns `true` if `role` is one of the roles the schema accepts.
pub fn is_known_role(role: &str) -> bool {
    role == ROLE_CUSTOMER || role == ROLE_EMPLOYEE
}
