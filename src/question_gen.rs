// src/question_gen.rs

use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// One option of a generated candidate question, with its correctness flag.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratedOption {
    pub text: String,
    pub is_correct: bool,
}

/// Candidate question shape returned by the external generative service.
/// Passed through to the client untouched; nothing is persisted here.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<GeneratedOption>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    transcript: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    questions: Vec<GeneratedQuestion>,
}

/// Client for the external generative question service.
///
/// Built once at startup and cloned into handlers, so the underlying
/// `reqwest` connection pool is shared across requests.
#[derive(Clone)]
pub struct QuestionService {
    client: reqwest::Client,
    url: Option<String>,
}

impl QuestionService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.question_service_url.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Sends a transcript to the configured question service and returns its
    /// candidate questions. Any upstream failure surfaces as a 502-category
    /// error; this client never retries.
    pub async fn generate(&self, transcript: &str) -> Result<Vec<GeneratedQuestion>, AppError> {
        let url = self.url.as_deref().ok_or_else(|| {
            AppError::BadRequest("Question generation is not configured".to_string())
        })?;

        let response = self
            .client
            .post(url)
            .json(&GenerateRequest { transcript })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::BadGateway(format!(
                "Question service answered {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_question_parses_service_shape() {
        let question: GeneratedQuestion = serde_json::from_value(serde_json::json!({
            "question": "What is 2 + 2?",
            "options": [
                {"text": "3", "is_correct": false},
                {"text": "4", "is_correct": true}
            ]
        }))
        .unwrap();

        assert_eq!(question.options.len(), 2);
        assert!(question.options[1].is_correct);
    }

    #[test]
    fn service_reflects_configuration() {
        let mut config = Config {
            database_url: "postgres://localhost/pollroom".to_string(),
            rust_log: "error".to_string(),
            port: 0,
            question_service_url: None,
        };
        assert!(!QuestionService::new(&config).is_configured());

        config.question_service_url = Some("http://localhost:9000/generate".to_string());
        assert!(QuestionService::new(&config).is_configured());
    }
}
