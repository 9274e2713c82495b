// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,

    /// Endpoint of the external generative question service. Optional; the
    /// generate route answers 400 when it is not configured.
    pub question_service_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let question_service_url = env::var("QUESTION_SERVICE_URL").ok();

        Self {
            database_url,
            rust_log,
            port,
            question_service_url,
        }
    }
}
