// src/handlers/polls.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::room::{CreatePollRequest, SubmitAnswerRequest},
    store::rooms::RoomStore,
};

/// Launches a poll inside an active room.
/// Returns 201 Created and the updated room snapshot, which the caller's
/// broadcast layer pushes to connected clients.
pub async fn create_poll(
    State(rooms): State<RoomStore>,
    Path(code): Path<String>,
    Json(payload): Json<CreatePollRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    if let Some(index) = payload.correct_option_index
        && (index as usize) >= payload.options.len()
    {
        return Err(AppError::BadRequest(format!(
            "Correct option index {} is out of range for {} options",
            index,
            payload.options.len()
        )));
    }

    let room = rooms
        .append_poll(
            &code,
            payload.question,
            payload.options,
            payload.correct_option_index,
            payload.timer_seconds,
        )
        .await?;
    tracing::info!("Poll launched in room {}", room.room_code);

    Ok((StatusCode::CREATED, Json(room)))
}

/// Records one student's answer to a poll in an active room.
/// Repeat submissions are appended as-is; deduplication is not attempted.
pub async fn submit_answer(
    State(rooms): State<RoomStore>,
    Path((code, poll_id)): Path<(String, i64)>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let room = rooms
        .append_answer(&code, poll_id, payload.user_id, payload.answer_index)
        .await?;

    Ok((StatusCode::CREATED, Json(room)))
}
