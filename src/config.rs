use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::errors::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_QUESTION_TIME_LIMIT_SECS: u32 = 120;
pub const DEFAULT_ADVANCE_DELAY_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub quiz_timing: QuizTiming,
}

/// Countdown budget per question and the pause before auto-advancing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizTiming {
    pub question_time_limit_secs: u32,
    pub advance_delay: Duration,
}

impl Default for QuizTiming {
    fn default() -> Self {
        Self {
            question_time_limit_secs: DEFAULT_QUESTION_TIME_LIMIT_SECS,
            advance_delay: Duration::from_secs(DEFAULT_ADVANCE_DELAY_SECS),
        }
    }
}

impl Config {
    /// Reads the process environment. The API key is mandatory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = require_api_key(env::var("GEMINI_API_KEY").ok())?;

        Ok(Self {
            gemini_api_key,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_timeout_secs: parse_var("GEMINI_TIMEOUT_SECS", 60)?,
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: parse_var("WEB_SERVER_PORT", 8080)?,
            quiz_timing: QuizTiming {
                question_time_limit_secs: parse_var(
                    "QUESTION_TIME_LIMIT_SECS",
                    DEFAULT_QUESTION_TIME_LIMIT_SECS,
                )?,
                advance_delay: Duration::from_secs(parse_var(
                    "ADVANCE_DELAY_SECS",
                    DEFAULT_ADVANCE_DELAY_SECS,
                )?),
            },
        })
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_key: SecretString::from("test-api-key".to_string()),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            gemini_timeout_secs: 1,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            quiz_timing: QuizTiming::default(),
        }
    }
}

/// A blank key counts as missing.
fn require_api_key(raw: Option<String>) -> Result<SecretString, ConfigError> {
    raw.filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
        .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}
