// src/models/report.rs

use serde::Serialize;

/// Full analysis report for one room: the ranked leaderboard plus
/// per-question aggregates.
#[derive(Debug, Serialize)]
pub struct RoomReport {
    pub id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// "N/A" while the room is still open, otherwise the elapsed time
    /// between creation and end, rounded up to whole minutes ("<n> mins").
    pub duration: String,

    /// Sorted by score descending; ties keep first-answer encounter order.
    pub participants: Vec<Participant>,

    pub questions: Vec<QuestionStat>,
}

/// One leaderboard row.
#[derive(Debug, PartialEq, Serialize)]
pub struct Participant {
    pub name: String,
    pub score: i64,
    pub correct: u32,
    pub wrong: u32,

    /// "N/A" when no timing was accumulated, otherwise "<n> min".
    pub time_taken: String,
}

/// Aggregate correctness for one poll, in room order.
#[derive(Debug, PartialEq, Serialize)]
pub struct QuestionStat {
    pub text: String,
    pub correct_count: u32,
}
