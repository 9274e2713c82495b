// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table: the identity records the report layer uses
/// to resolve answer user ids to display names.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Stable identity key, matched against `Answer::user_id`.
    pub user_key: String,

    /// Human display name shown on leaderboards.
    pub name: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for registering (or refreshing) a display name.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub user_key: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Display name length must be between 1 and 50 characters."
    ))]
    pub name: String,
}
