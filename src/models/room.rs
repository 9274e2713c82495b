// src/models/room.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Room status values as stored. Status is normalized to lowercase at the
/// storage boundary, so all comparisons against these constants are exact.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_ENDED: &str = "ended";

/// Represents one row of the 'rooms' table: a teacher-owned live session.
/// The embedded polls (each embedding its answers) are stored as a single
/// JSONB document column; a fetched `Room` is a plain snapshot, never a live
/// handle.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,

    /// Short uppercase alphanumeric code students enter to join.
    pub room_code: String,

    /// Display label, immutable after creation.
    pub name: String,

    /// Owning teacher identity key.
    pub teacher_id: String,

    /// 'active' or 'ended'; the only transition is active -> ended.
    pub status: String,

    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Stamped once, when the room is ended. Never cleared.
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Insertion-ordered sequence of polls launched in this room.
    pub polls: Json<Vec<Poll>>,
}

impl Room {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    pub fn is_ended(&self) -> bool {
        self.status == STATUS_ENDED
    }

    /// Next poll id, unique within this room. Ids are a monotonic per-room
    /// counter, so creation order is recoverable from the ids alone.
    pub fn next_poll_id(&self) -> i64 {
        self.polls.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    pub fn poll(&self, poll_id: i64) -> Option<&Poll> {
        self.polls.iter().find(|p| p.id == poll_id)
    }
}

/// A single multiple-choice question embedded in a room document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: i64,

    pub question: String,

    /// Ordered option labels; position is the answer key, values may repeat.
    pub options: Vec<String>,

    /// Index into `options` marking the correct answer. `None` means no
    /// correct answer was configured: every submission to such a poll
    /// tallies as wrong.
    #[serde(default)]
    pub correct_option_index: Option<u32>,

    /// Seconds the poll stays open. Advisory client-side countdown only;
    /// nothing server-side enforces it.
    pub timer_seconds: u32,

    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Submission-ordered answers. Not deduplicated per student; a repeat
    /// submission is appended and tallied additively.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// One student's selected option for one poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub user_id: String,
    pub answer_index: u32,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new room.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Room name length must be between 1 and 100 characters."
    ))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub teacher_id: String,
}

/// DTO for launching a poll inside a room.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePollRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    /// Omitted or null means "no correct answer configured".
    #[serde(default)]
    pub correct_option_index: Option<u32>,
    #[serde(default = "default_timer_seconds")]
    pub timer_seconds: u32,
}

fn default_timer_seconds() -> u32 {
    60
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 {
        return Err(validator::ValidationError::new("at_least_two_options"));
    }
    for opt in options {
        if opt.is_empty() || opt.len() > 500 {
            return Err(validator::ValidationError::new("option_length_invalid"));
        }
    }
    Ok(())
}

/// DTO for a student submitting an answer to a poll.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,
    pub answer_index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_with_status(status: &str) -> Room {
        Room {
            id: 1,
            room_code: "AB12CD".to_string(),
            name: "Algebra".to_string(),
            teacher_id: "teacher-1".to_string(),
            status: status.to_string(),
            created_at: chrono::Utc::now(),
            ended_at: None,
            polls: Json(Vec::new()),
        }
    }

    #[test]
    fn status_predicates() {
        let active = room_with_status(STATUS_ACTIVE);
        assert!(active.is_active());
        assert!(!active.is_ended());

        let ended = room_with_status(STATUS_ENDED);
        assert!(!ended.is_active());
        assert!(ended.is_ended());
    }

    #[test]
    fn poll_ids_are_monotonic_within_room() {
        let mut room = room_with_status(STATUS_ACTIVE);
        assert_eq!(room.next_poll_id(), 1);

        room.polls.0.push(Poll {
            id: 1,
            question: "Q1".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_option_index: Some(0),
            timer_seconds: 60,
            created_at: chrono::Utc::now(),
            answers: Vec::new(),
        });
        assert_eq!(room.next_poll_id(), 2);
    }

    #[test]
    fn poll_deserializes_without_correct_index_or_answers() {
        // Older documents may predate both fields; they must parse as
        // "no correct answer configured" with an empty answer list.
        let poll: Poll = serde_json::from_value(serde_json::json!({
            "id": 1,
            "question": "Capital of France?",
            "options": ["Paris", "Lyon"],
            "timer_seconds": 30,
            "created_at": "2026-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(poll.correct_option_index, None);
        assert!(poll.answers.is_empty());
    }

    #[test]
    fn create_poll_request_rejects_single_option() {
        let req = CreatePollRequest {
            question: "Q".to_string(),
            options: vec!["only".to_string()],
            correct_option_index: None,
            timer_seconds: 60,
        };
        assert!(validator::Validate::validate(&req).is_err());
    }
}
