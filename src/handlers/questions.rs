// src/handlers/questions.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{error::AppError, question_gen::QuestionService};

/// DTO for requesting candidate questions from a transcript.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, max = 100000))]
    pub transcript: String,
}

/// Proxies a transcript to the external generative question service and
/// returns its candidate questions unmodified. Nothing is persisted; the
/// teacher picks which candidates become polls.
pub async fn generate_questions(
    State(questions): State<QuestionService>,
    Json(payload): Json<GenerateQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let candidates = questions.generate(&payload.transcript).await?;
    Ok(Json(candidates))
}
