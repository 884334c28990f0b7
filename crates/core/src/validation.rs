//! Input validators applied at the HTTP boundary.
//!
//! The numeric and date rules repeat the schema's check constraints so that
//! bad input is rejected with a readable 400 before a statement is sent. The
//! database remains the authority; these only make the error friendlier.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Longest e-mail address accepted.
pub const MAX_EMAIL_LEN: usize = 100;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 30;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MIN_YEAR_ESTABLISHED: i32 = 1800;
pub const MAX_YEAR_ESTABLISHED: i32 = 2100;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid regex"));

/// Reject empty or whitespace-only required fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(email) {
        return Err(CoreError::Validation("Invalid email format".into()));
    }
    Ok(())
}

/// Usernames are 3-30 characters of ASCII letters, digits and underscores.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) || !USERNAME_RE.is_match(username) {
        return Err(CoreError::Validation(format!(
            "Username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters, \
             alphanumeric and underscores only"
        )));
    }
    Ok(())
}

/// Passwords need 8-128 characters with at least one letter and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must not exceed {MAX_PASSWORD_LEN} characters"
        )));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(
            "Password must contain at least one letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(
            "Password must contain at least one number".into(),
        ));
    }
    Ok(())
}

/// Mirrors `ck_feedback_rating`.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Strictly positive check for counts and amounts (`num_episodes`,
/// `per_episode_charge`).
pub fn validate_positive<T>(field: &str, value: T) -> Result<(), CoreError>
where
    T: PartialOrd + Default,
{
    if value <= T::default() {
        return Err(CoreError::Validation(format!("{field} must be positive")));
    }
    Ok(())
}

/// Zero-or-more check for counters such as `total_viewers`.
pub fn validate_non_negative<T>(field: &str, value: T) -> Result<(), CoreError>
where
    T: PartialOrd + Default,
{
    if value < T::default() {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

/// `end` must fall strictly after `start` (contracts, alliances, schedules).
pub fn validate_date_order<T: PartialOrd>(
    start_field: &str,
    start: T,
    end_field: &str,
    end: T,
) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(format!(
            "{end_field} must be after {start_field}"
        )));
    }
    Ok(())
}

/// Mirrors `ck_production_houses_year_established`.
pub fn validate_year_established(year: i32) -> Result<(), CoreError> {
    if !(MIN_YEAR_ESTABLISHED..=MAX_YEAR_ESTABLISHED).contains(&year) {
        return Err(CoreError::Validation(format!(
            "Year established must be between {MIN_YEAR_ESTABLISHED} and {MAX_YEAR_ESTABLISHED}"
        )));
    }
    Ok(())
}
