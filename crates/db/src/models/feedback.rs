//! Feedback (one rating per series per account) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub web_series_id: DbId,
    pub account_id: DbId,
    pub rating: i32,
    pub feedback_text: String,
    pub recorded_at: Timestamp,
}

/// Public review: rating with the reviewer's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub rating: i32,
    pub feedback_text: String,
    pub recorded_at: Timestamp,
    pub first_name: String,
    pub last_name: String,
}

/// An account's own feedback with the series name (profile history).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedbackHistoryItem {
    pub web_series_id: DbId,
    pub web_series_name: String,
    pub rating: i32,
    pub feedback_text: String,
    pub recorded_at: Timestamp,
}

/// Body of `PUT /series/{id}/feedback`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertFeedback {
    pub rating: i32,
    #[serde(default)]
    pub feedback_text: String,
}
