use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

use pulse_config::{
    ACCESS_CODE, ACCESS_REQUEST_NOTIFY_EMAIL, AI_GATEWAY_API_KEY, AI_GATEWAY_MODEL,
    AI_GATEWAY_TIMEOUT_SECS, AI_GATEWAY_URL, DEFAULT_EMAIL_API_URL, DEFAULT_EMAIL_FROM,
    DEFAULT_GATEWAY_MODEL, DEFAULT_GATEWAY_TIMEOUT_SECS, DEFAULT_GATEWAY_URL, DEFAULT_HOST,
    DEFAULT_PORT, EMAIL_API_KEY, EMAIL_API_URL, EMAIL_FROM, HOST, PORT,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid gateway timeout: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub gateway_url: String,
    pub gateway_model: String,
    pub gateway_api_key: Option<String>,
    pub gateway_timeout: Duration,
    pub access_code: Option<String>,
    pub email_api_key: Option<String>,
    pub email_api_url: String,
    pub email_from: String,
    pub access_request_notify: Option<String>,
}

/// Unset and blank variables both read as `None`
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    optional_var(name).unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = var_or(PORT, &DEFAULT_PORT.to_string()).parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let timeout_str = var_or(
            AI_GATEWAY_TIMEOUT_SECS,
            &DEFAULT_GATEWAY_TIMEOUT_SECS.to_string(),
        );
        let timeout_secs = timeout_str
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout(timeout_str.clone()))?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(timeout_str));
        }

        Ok(Config {
            port,
            host: var_or(HOST, DEFAULT_HOST),
            gateway_url: var_or(AI_GATEWAY_URL, DEFAULT_GATEWAY_URL),
            gateway_model: var_or(AI_GATEWAY_MODEL, DEFAULT_GATEWAY_MODEL),
            gateway_api_key: optional_var(AI_GATEWAY_API_KEY),
            gateway_timeout: Duration::from_secs(timeout_secs),
            access_code: optional_var(ACCESS_CODE),
            email_api_key: optional_var(EMAIL_API_KEY),
            email_api_url: var_or(EMAIL_API_URL, DEFAULT_EMAIL_API_URL),
            email_from: var_or(EMAIL_FROM, DEFAULT_EMAIL_FROM),
            access_request_notify: optional_var(ACCESS_REQUEST_NOTIFY_EMAIL),
        })
    }
}
