use std::{env, path::PathBuf, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_api_base: Option<String>,
    pub openai_model: String,
    pub llm_timeout_secs: u64,
    pub strict_payloads: bool,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub history_limit: usize,
    pub api_url: String,
    pub data_dir: PathBuf,
    pub client_timeout_secs: u64,
}

impl Config {
    /// Reads configuration from the process environment, loading `.env` first
    /// when one exists.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE").ok().filter(|v| !v.trim().is_empty()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            llm_timeout_secs: parse_var("LLM_TIMEOUT_SECS", 60),
            strict_payloads: env::var("STRICT_PAYLOADS")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: parse_var("WEB_SERVER_PORT", 8080),
            history_limit: parse_var("HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT),
            api_url: env::var("QUDURAT_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            data_dir: env::var("QUDURAT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".qudurat")),
            client_timeout_secs: parse_var("QUDURAT_CLIENT_TIMEOUT_SECS", 120),
        }
    }

    /// Checks the settings the LLM gateway cannot run without.
    pub fn validate(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENAI_API_KEY is not set. Export it or add it to .env".to_string(),
            ));
        }
        if self.openai_model.trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENAI_MODEL must not be empty".to_string(),
            ));
        }
        if self.history_limit == 0 {
            return Err(AppError::ValidationError(
                "HISTORY_LIMIT must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_secs(self.client_timeout_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            llm_timeout_secs: 5,
            strict_payloads: true,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            history_limit: DEFAULT_HISTORY_LIMIT,
            api_url: "http://127.0.0.1:8080".to_string(),
            data_dir: PathBuf::from(".qudurat-test"),
            client_timeout_secs: 5,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
