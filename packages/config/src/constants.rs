// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Pulse

// Server Configuration
pub const PORT: &str = "PORT";
pub const HOST: &str = "HOST";

// Model Gateway Configuration
pub const AI_GATEWAY_API_KEY: &str = "AI_GATEWAY_API_KEY";
pub const AI_GATEWAY_URL: &str = "AI_GATEWAY_URL";
pub const AI_GATEWAY_MODEL: &str = "AI_GATEWAY_MODEL";
pub const AI_GATEWAY_TIMEOUT_SECS: &str = "AI_GATEWAY_TIMEOUT_SECS";

// Access Code Validation
pub const ACCESS_CODE: &str = "ACCESS_CODE";

// Access Request Emails
pub const EMAIL_API_KEY: &str = "EMAIL_API_KEY";
pub const EMAIL_API_URL: &str = "EMAIL_API_URL";
pub const EMAIL_FROM: &str = "EMAIL_FROM";
pub const ACCESS_REQUEST_NOTIFY_EMAIL: &str = "ACCESS_REQUEST_NOTIFY_EMAIL";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_PORT: u16 = 4001;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_GATEWAY_URL: &str = "https://openrouter.ai/api";
pub const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_EMAIL_FROM: &str = "Pulse <noreply@pulse.app>";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";
