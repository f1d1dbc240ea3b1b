// ABOUTME: Error taxonomy for the analysis endpoints and its HTTP mapping
// ABOUTME: Every failure becomes a `{"error": message}` body with a status that names its class

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use pulse_ai::GatewayError;
use pulse_core::{truncate, ValidationError};

use crate::mailer::MailerError;

// Upstream bodies are logged for diagnosis but can be large
const MAX_LOGGED_BODY_CHARS: usize = 2_000;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Model gateway rate limit exceeded")]
    RateLimited,

    #[error("Model gateway quota exhausted")]
    QuotaExhausted,

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

pub type ApiResult<T> = Result<T, AnalysisError>;

impl AnalysisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::Validation(_) | AnalysisError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AnalysisError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AnalysisError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AnalysisError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            AnalysisError::Configuration(_)
            | AnalysisError::Upstream { .. }
            | AnalysisError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the dashboard user; never carries upstream details
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation(e) => e.to_string(),
            AnalysisError::InvalidBody(_) => {
                "Corpo della richiesta non valido: è atteso un oggetto JSON".to_string()
            }
            AnalysisError::Unauthorized(msg) => msg.clone(),
            AnalysisError::Configuration(_) => {
                "Servizio AI non configurato. Contatta l'assistenza.".to_string()
            }
            AnalysisError::RateLimited => {
                "Troppe richieste al servizio AI. Riprova tra qualche istante.".to_string()
            }
            AnalysisError::QuotaExhausted => {
                "Crediti AI esauriti. Ricarica il tuo piano per continuare a usare le analisi."
                    .to_string()
            }
            AnalysisError::Upstream { .. } | AnalysisError::Transport(_) => {
                "Errore durante l'analisi AI. Riprova più tardi.".to_string()
            }
        }
    }

    fn log(&self) {
        match self {
            AnalysisError::Validation(_) | AnalysisError::InvalidBody(_) => {
                info!(error = %self, "Rejected invalid request");
            }
            AnalysisError::Unauthorized(_) => {
                warn!(error = %self, "Unauthorized request");
            }
            AnalysisError::Configuration(msg) => {
                error!(config_error = %msg, "Configuration error");
            }
            AnalysisError::RateLimited | AnalysisError::QuotaExhausted => {
                warn!(error = %self, "Model gateway refused the request");
            }
            AnalysisError::Upstream { status, body } => {
                error!(
                    upstream_status = %status,
                    upstream_body = %truncate(body, MAX_LOGGED_BODY_CHARS),
                    "Upstream service error"
                );
            }
            AnalysisError::Transport(msg) => {
                error!(transport_error = %msg, "Upstream service unreachable");
            }
        }
    }
}

impl From<GatewayError> for AnalysisError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingApiKey => {
                AnalysisError::Configuration("model gateway API key is not set".to_string())
            }
            GatewayError::Status { status: 429, .. } => AnalysisError::RateLimited,
            GatewayError::Status { status: 402, .. } => AnalysisError::QuotaExhausted,
            GatewayError::Status { status, body } => AnalysisError::Upstream { status, body },
            GatewayError::Timeout(_) | GatewayError::Transport(_) => {
                AnalysisError::Transport(err.to_string())
            }
            GatewayError::InvalidResponse(msg) => {
                AnalysisError::Transport(format!("invalid gateway response: {}", msg))
            }
        }
    }
}

impl From<MailerError> for AnalysisError {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::MissingApiKey | MailerError::MissingRecipient => {
                AnalysisError::Configuration(err.to_string())
            }
            MailerError::Status { status, body } => AnalysisError::Upstream { status, body },
            MailerError::Transport(e) => AnalysisError::Transport(e.to_string()),
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(json!({ "error": self.user_message() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_gateway_status_mapping() {
        let rate_limited = AnalysisError::from(GatewayError::Status {
            status: 429,
            body: String::new(),
        });
        assert_eq!(rate_limited.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let quota = AnalysisError::from(GatewayError::Status {
            status: 402,
            body: String::new(),
        });
        assert_eq!(quota.status_code(), StatusCode::PAYMENT_REQUIRED);

        let server = AnalysisError::from(GatewayError::Status {
            status: 503,
            body: "overloaded".to_string(),
        });
        assert_eq!(server.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(server, AnalysisError::Upstream { status: 503, .. }));
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let error = AnalysisError::from(GatewayError::MissingApiKey);
        assert!(matches!(error, AnalysisError::Configuration(_)));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_timeout_is_transport_error() {
        let error = AnalysisError::from(GatewayError::Timeout(Duration::from_secs(30)));
        assert!(matches!(error, AnalysisError::Transport(_)));
    }

    #[test]
    fn test_validation_is_bad_request_with_field_message() {
        let error = AnalysisError::from(ValidationError::Missing("role"));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.user_message(), "Il campo 'role' è obbligatorio");
    }

    #[test]
    fn test_upstream_details_are_not_exposed() {
        let error = AnalysisError::Upstream {
            status: 500,
            body: "stack trace with secret-token".to_string(),
        };
        let message = error.user_message();
        assert!(!message.contains("secret-token"));
        assert!(!message.contains("500"));
    }

    #[test]
    fn test_mailer_error_mapping() {
        assert!(matches!(
            AnalysisError::from(MailerError::MissingApiKey),
            AnalysisError::Configuration(_)
        ));
        assert!(matches!(
            AnalysisError::from(MailerError::Status {
                status: 422,
                body: "bad sender".to_string()
            }),
            AnalysisError::Upstream { status: 422, .. }
        ));
    }
}
