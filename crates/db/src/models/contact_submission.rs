//! Contact submission model and DTOs.

use renungan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contact_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactSubmission {
    pub id: DbId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub town: String,
    pub email: String,
    pub want_follow_jesus: bool,
    pub want_bible: bool,
    pub want_prayer_request: bool,
    pub want_ask_question: bool,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a contact submission.
#[derive(Debug, Clone)]
pub struct CreateContactSubmission {
    pub first_name: String,
    pub last_name: Option<String>,
    pub town: String,
    pub email: String,
    pub want_follow_jesus: bool,
    pub want_bible: bool,
    pub want_prayer_request: bool,
    pub want_ask_question: bool,
    pub message: Option<String>,
}
