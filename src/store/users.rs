// src/store/users.rs

use std::collections::HashMap;

use sqlx::PgPool;

use crate::{error::AppError, models::user::User};

/// Identity store: registration and the batch name lookup the report layer
/// depends on.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers a display name, refreshing it if the key is already known.
    pub async fn upsert(&self, user_key: &str, name: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (user_key, name) VALUES ($1, $2) \
             ON CONFLICT (user_key) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, user_key, name, created_at",
        )
        .bind(user_key)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_key(&self, user_key: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, user_key, name, created_at FROM users WHERE user_key = $1",
        )
        .bind(user_key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Batch lookup: identity key -> display name. Keys with no matching
    /// user are simply absent from the map; the caller supplies the
    /// fallback.
    pub async fn names_for(&self, keys: &[String]) -> Result<HashMap<String, String>, AppError> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT user_key, name FROM users WHERE user_key = ANY($1)")
                .bind(keys)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
