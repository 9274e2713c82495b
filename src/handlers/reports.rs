// src/handlers/reports.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    analysis,
    error::AppError,
    store::{rooms::RoomStore, users::UserStore},
};

/// Builds the analysis report for one room: ranked leaderboard plus
/// per-question aggregates.
///
/// An unknown code is a hard 404 here, never a partially-empty report; the
/// predicate-style collapse to `false` is reserved for the join checks.
pub async fn room_report(
    State(rooms): State<RoomStore>,
    State(users): State<UserStore>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let room = rooms
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

    let tallies = analysis::tally_participants(&room.polls);
    let keys: Vec<String> = tallies.iter().map(|t| t.user_id.clone()).collect();
    let names = users.names_for(&keys).await?;

    Ok(Json(analysis::build_report(&room, tallies, &names)))
}
