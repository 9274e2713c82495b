// src/handlers/rooms.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::room::{CreateRoomRequest, STATUS_ACTIVE, STATUS_ENDED},
    store::rooms::{RoomFilter, RoomStore},
};

/// Query parameters for listing a teacher's rooms.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub teacher_id: String,
    pub status: Option<String>,
}

/// Creates a room with a generated join code.
/// Returns 201 Created and the room snapshot.
pub async fn create_room(
    State(rooms): State<RoomStore>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let room = rooms.create(&payload.name, &payload.teacher_id).await?;
    tracing::info!("Room {} created by {}", room.room_code, room.teacher_id);

    Ok((StatusCode::CREATED, Json(room)))
}

/// Lists a teacher's rooms, newest first, optionally filtered by status.
pub async fn list_rooms(
    State(rooms): State<RoomStore>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(status) = params.status.as_deref()
        && status != STATUS_ACTIVE
        && status != STATUS_ENDED
    {
        return Err(AppError::BadRequest(format!(
            "Unknown status '{}', expected '{}' or '{}'",
            status, STATUS_ACTIVE, STATUS_ENDED
        )));
    }

    let filter = RoomFilter {
        teacher_id: params.teacher_id,
        status: params.status,
    };
    let result = rooms.find_by_teacher(&filter).await?;

    Ok(Json(result))
}

/// Retrieves a single room snapshot by join code.
pub async fn get_room(
    State(rooms): State<RoomStore>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = rooms
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    Ok(Json(room))
}

/// Join predicate for the given code. Absent rooms collapse to
/// `can_join: false` rather than a 404; students probing a mistyped code
/// are not an error.
pub async fn joinable(
    State(rooms): State<RoomStore>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // One snapshot answers both fields, so the response stays internally
    // consistent even when the room ends mid-request.
    let (can_join, ended) = match rooms.find_by_code(&code).await? {
        Some(room) => (room.is_active(), room.is_ended()),
        None => (false, false),
    };

    Ok(Json(json!({
        "can_join": can_join,
        "ended": ended,
    })))
}

/// Ends a room: one-way transition, idempotent. 404 only when no room with
/// that code exists at all.
pub async fn end_room(
    State(rooms): State<RoomStore>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let updated = rooms.end_room(&code).await?;
    if !updated {
        return Err(AppError::NotFound("Room not found".to_string()));
    }

    tracing::info!("Room {} ended", code);
    Ok(Json(json!({ "ended": true })))
}
