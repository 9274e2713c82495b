// src/analysis.rs

use std::collections::HashMap;

use crate::models::{
    report::{Participant, QuestionStat, RoomReport},
    room::{Poll, Room},
};

/// Points awarded per correct answer.
pub const POINTS_CORRECT: i64 = 5;
/// Points deducted per wrong answer.
pub const POINTS_WRONG: i64 = 2;

/// Display name used when an answer's user id resolves to no known user.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Per-student accumulator built from a single pass over a room's polls.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantTally {
    pub user_id: String,
    pub correct: u32,
    pub wrong: u32,
    pub score: i64,

    /// Never accumulated yet: the intended source is
    /// `answer.answered_at - poll.created_at`, but that derivation is not
    /// wired up, so reports render "N/A" for every participant.
    /// TODO: accumulate `answered_at - poll.created_at` here once per-poll
    /// timing is confirmed with the client.
    pub time_taken_seconds: i64,
}

/// Tallies every answer in every poll, in stored order.
///
/// An accumulator is created lazily on a student's first answer, so students
/// who answered nothing never appear. Duplicate answers from the same student
/// to the same poll are tallied additively, each on its own. An answer to a
/// poll with no configured correct option always counts as wrong.
///
/// The result is sorted by score descending; the sort is stable, so ties
/// keep first-answer encounter order.
pub fn tally_participants(polls: &[Poll]) -> Vec<ParticipantTally> {
    let mut tallies: Vec<ParticipantTally> = Vec::new();
    let mut index_by_user: HashMap<&str, usize> = HashMap::new();

    for poll in polls {
        for answer in &poll.answers {
            let idx = *index_by_user.entry(answer.user_id.as_str()).or_insert_with(|| {
                tallies.push(ParticipantTally {
                    user_id: answer.user_id.clone(),
                    correct: 0,
                    wrong: 0,
                    score: 0,
                    time_taken_seconds: 0,
                });
                tallies.len() - 1
            });

            let tally = &mut tallies[idx];
            if poll.correct_option_index == Some(answer.answer_index) {
                tally.correct += 1;
                tally.score += POINTS_CORRECT;
            } else {
                tally.wrong += 1;
                tally.score -= POINTS_WRONG;
            }
        }
    }

    tallies.sort_by(|a, b| b.score.cmp(&a.score));
    tallies
}

/// Per-question aggregate: how many answers hit the correct option, in room
/// order. A poll with no configured correct option contributes zero.
pub fn question_stats(polls: &[Poll]) -> Vec<QuestionStat> {
    polls
        .iter()
        .map(|poll| QuestionStat {
            text: poll.question.clone(),
            correct_count: poll
                .answers
                .iter()
                .filter(|a| poll.correct_option_index == Some(a.answer_index))
                .count() as u32,
        })
        .collect()
}

/// Builds the full report for one room snapshot.
///
/// `tallies` must come from `tally_participants` over the same snapshot (the
/// caller already needs them to know which names to look up). `names` maps
/// user identity keys to display names; keys absent from the map fall back
/// to "Anonymous".
pub fn build_report(
    room: &Room,
    tallies: Vec<ParticipantTally>,
    names: &HashMap<String, String>,
) -> RoomReport {
    let participants = tallies
        .into_iter()
        .map(|t| Participant {
            name: names
                .get(&t.user_id)
                .cloned()
                .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
            score: t.score,
            correct: t.correct,
            wrong: t.wrong,
            time_taken: format_time_taken(t.time_taken_seconds),
        })
        .collect();

    RoomReport {
        id: room.id,
        name: room.name.clone(),
        created_at: room.created_at,
        duration: format_duration(room.created_at, room.ended_at),
        participants,
        questions: question_stats(&room.polls),
    }
}

/// "N/A" until the room has ended, then ceil-minutes elapsed as "<n> mins".
fn format_duration(
    created_at: chrono::DateTime<chrono::Utc>,
    ended_at: Option<chrono::DateTime<chrono::Utc>>,
) -> String {
    match ended_at {
        None => "N/A".to_string(),
        Some(ended) => {
            let seconds = (ended - created_at).num_seconds().max(0);
            format!("{} mins", seconds.div_ceil(60))
        }
    }
}

/// "N/A" when nothing was accumulated, else ceil-minutes as "<n> min".
fn format_time_taken(seconds: i64) -> String {
    if seconds == 0 {
        "N/A".to_string()
    } else {
        format!("{} min", seconds.div_ceil(60))
    }
}
