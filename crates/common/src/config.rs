use crate::error::StudyGenError;
use crate::logger::parse_log_level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Gemini model collection endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default Gemini model name
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default number of quiz questions
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// StudyGen application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key, sent as the `key` query parameter
    pub api_key: String,

    /// Gemini model collection URL (without trailing slash)
    pub base_url: String,

    /// Gemini model name
    pub model: String,

    /// Number of questions requested per quiz
    pub question_count: u32,

    /// Log directory (console-only logging when unset)
    pub log_dir: Option<PathBuf>,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            question_count: DEFAULT_QUESTION_COUNT,
            log_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, StudyGenError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let question_count = match std::env::var("QUESTION_COUNT") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                StudyGenError::config(format!(
                    "QUESTION_COUNT must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_QUESTION_COUNT,
        };

        Ok(Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            question_count,
            log_dir: std::env::var("LOG_DIR").ok().map(PathBuf::from),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Full `generateContent` URL for the configured model (key excluded)
    pub fn endpoint_url(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), StudyGenError> {
        if self.api_key.trim().is_empty() {
            return Err(StudyGenError::config(
                "Gemini API key is not set (GEMINI_API_KEY or --api-key)",
            ));
        }

        if self.question_count == 0 {
            return Err(StudyGenError::config("Question count must be at least 1"));
        }

        if self.model.trim().is_empty() {
            return Err(StudyGenError::config("Model name cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(StudyGenError::config(
                "Gemini base URL must start with http:// or https://",
            ));
        }

        parse_log_level(&self.log_level)?;

        Ok(())
    }
}
