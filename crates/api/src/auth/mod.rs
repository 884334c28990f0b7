//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`reset_token`] -- single-use password-reset token material.

pub mod jwt;
pub mod password;
pub mod reset_token;
