// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{error::AppError, models::user::RegisterUserRequest, store::users::UserStore};

/// Registers a display name for an identity key, refreshing it if the key
/// is already known. Returns 201 Created and the stored record.
pub async fn register_user(
    State(users): State<UserStore>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = users.upsert(&payload.user_key, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Looks up a single identity record by key.
pub async fn get_user(
    State(users): State<UserStore>,
    Path(user_key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = users
        .find_by_key(&user_key)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
