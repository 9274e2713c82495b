// src/store/rooms.rs

use sqlx::{PgPool, types::Json};

use crate::{
    error::AppError,
    models::room::{Answer, Poll, Room, STATUS_ACTIVE, STATUS_ENDED},
    utils::codes::generate_room_code,
};

const ROOM_COLUMNS: &str =
    "id, room_code, name, teacher_id, status, created_at, ended_at, polls";

/// How many generated codes to try before giving up on room creation.
const CODE_ATTEMPTS: usize = 5;

/// Typed filter for listing a teacher's rooms.
#[derive(Debug, Clone)]
pub struct RoomFilter {
    pub teacher_id: String,
    /// `None` lists rooms in any status.
    pub status: Option<String>,
}

/// Room Lifecycle Manager backed by the document store.
///
/// Takes its store access as a constructor parameter; every read returns a
/// plain snapshot, every mutation is a filter-based update on the room row.
#[derive(Clone)]
pub struct RoomStore {
    pool: PgPool,
}

impl RoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a room with a freshly generated code and `status = active`.
    ///
    /// Each candidate code is checked against the store before insertion,
    /// with the unique constraint on `room_code` as the backstop for a
    /// concurrent claim; a handful of collisions in a row exhausts the
    /// attempt budget and surfaces as a conflict.
    pub async fn create(&self, name: &str, teacher_id: &str) -> Result<Room, AppError> {
        for _ in 0..CODE_ATTEMPTS {
            let code = generate_room_code();

            let taken: Option<(i64,)> =
                sqlx::query_as("SELECT id FROM rooms WHERE room_code = $1")
                    .bind(&code)
                    .fetch_optional(&self.pool)
                    .await?;
            if taken.is_some() {
                tracing::warn!("Room code collision on {}, regenerating", code);
                continue;
            }

            let inserted = sqlx::query_as::<_, Room>(&format!(
                "INSERT INTO rooms (room_code, name, teacher_id, status, polls) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING {ROOM_COLUMNS}"
            ))
            .bind(&code)
            .bind(name)
            .bind(teacher_id)
            .bind(STATUS_ACTIVE)
            .bind(Json(Vec::<Poll>::new()))
            .fetch_one(&self.pool)
            .await;

            match inserted {
                Ok(room) => return Ok(room),
                // Lost the race to a concurrent insert of the same code.
                Err(e)
                    if e.to_string().contains("unique constraint")
                        || e.to_string().contains("23505") =>
                {
                    tracing::warn!("Room code {} claimed concurrently, regenerating", code);
                    continue;
                }
                Err(e) => return Err(AppError::from(e)),
            }
        }

        Err(AppError::Conflict(
            "Could not allocate a unique room code".to_string(),
        ))
    }

    /// Exact-match lookup by code. Entered codes are normalized to the
    /// stored uppercase form first.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Room>, AppError> {
        let code = code.trim().to_ascii_uppercase();
        let room = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE room_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(room)
    }

    /// Lists a teacher's rooms, most recently created first, optionally
    /// narrowed to one status.
    pub async fn find_by_teacher(&self, filter: &RoomFilter) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms \
             WHERE teacher_id = $1 AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY created_at DESC"
        ))
        .bind(&filter.teacher_id)
        .bind(&filter.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }

    /// Flips the room to "ended", returning whether a room matched.
    ///
    /// No precondition on the current status: re-ending an ended room
    /// succeeds and returns true. `ended_at` is stamped only once, by the
    /// first call that ends the room.
    pub async fn end_room(&self, code: &str) -> Result<bool, AppError> {
        let code = code.trim().to_ascii_uppercase();
        let result = sqlx::query(
            "UPDATE rooms SET status = $1, ended_at = COALESCE(ended_at, NOW()) \
             WHERE room_code = $2",
        )
        .bind(STATUS_ENDED)
        .bind(code)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// True iff the room exists and is active. An absent room collapses to
    /// false; a failed store round trip does not.
    pub async fn is_valid(&self, code: &str) -> Result<bool, AppError> {
        Ok(self
            .find_by_code(code)
            .await?
            .is_some_and(|room| room.is_active()))
    }

    /// Join predicate. Status is normalized at the storage boundary, so this
    /// coincides with `is_valid`; both names are kept because they answer
    /// different caller questions.
    pub async fn can_join(&self, code: &str) -> Result<bool, AppError> {
        self.is_valid(code).await
    }

    /// True iff the room exists and has been ended.
    pub async fn is_ended(&self, code: &str) -> Result<bool, AppError> {
        Ok(self
            .find_by_code(code)
            .await?
            .is_some_and(|room| room.is_ended()))
    }

    /// Appends a poll to an active room and returns the updated snapshot.
    pub async fn append_poll(
        &self,
        code: &str,
        question: String,
        options: Vec<String>,
        correct_option_index: Option<u32>,
        timer_seconds: u32,
    ) -> Result<Room, AppError> {
        let room = self
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;
        if !room.is_active() {
            return Err(AppError::Conflict("Room has ended".to_string()));
        }

        let mut polls = room.polls.0.clone();
        polls.push(Poll {
            id: room.next_poll_id(),
            question,
            options,
            correct_option_index,
            timer_seconds,
            created_at: chrono::Utc::now(),
            answers: Vec::new(),
        });

        self.write_polls(&room.room_code, polls).await
    }

    /// Appends one answer to a poll in an active room and returns the
    /// updated snapshot. Repeat submissions from the same student are
    /// appended as-is, not deduplicated.
    pub async fn append_answer(
        &self,
        code: &str,
        poll_id: i64,
        user_id: String,
        answer_index: u32,
    ) -> Result<Room, AppError> {
        let room = self
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;
        if !room.is_active() {
            return Err(AppError::Conflict("Room has ended".to_string()));
        }

        let mut polls = room.polls.0.clone();
        let poll = polls
            .iter_mut()
            .find(|p| p.id == poll_id)
            .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

        if (answer_index as usize) >= poll.options.len() {
            return Err(AppError::BadRequest(format!(
                "Answer index {} is out of range for {} options",
                answer_index,
                poll.options.len()
            )));
        }

        poll.answers.push(Answer {
            user_id,
            answer_index,
            answered_at: chrono::Utc::now(),
        });

        self.write_polls(&room.room_code, polls).await
    }

    /// Writes the full polls document back onto the room row.
    async fn write_polls(&self, room_code: &str, polls: Vec<Poll>) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(&format!(
            "UPDATE rooms SET polls = $1 WHERE room_code = $2 RETURNING {ROOM_COLUMNS}"
        ))
        .bind(Json(polls))
        .bind(room_code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))
    }
}
