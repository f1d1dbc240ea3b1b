// ABOUTME: Access gate endpoints: shared access code check and access request emails
// ABOUTME: Codes are compared through SHA-256 digests, never as raw strings

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use pulse_core::validation::{is_plausible_email, require_non_empty};
use pulse_core::ValidationError;

use crate::analysis_handlers::parse_body;
use crate::error::{AnalysisError, ApiResult};
use crate::mailer::AccessRequest;
use crate::state::AppState;

const INVALID_CODE_MESSAGE: &str = "Codice di accesso non valido";

#[derive(Debug, Default, Deserialize)]
pub struct AccessCodeRequest {
    #[serde(default)]
    pub code: String,
}

fn digest(value: &str) -> Vec<u8> {
    Sha256::digest(value.as_bytes()).to_vec()
}

/// Equal-length digest comparison so timing does not depend on the input
fn codes_match(candidate: &str, expected: &str) -> bool {
    digest(candidate.trim())
        .iter()
        .zip(digest(expected.trim()).iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

pub async fn validate_access_code(State(state): State<AppState>, body: Bytes) -> Response {
    match check_access_code(&state, &body) {
        Ok(true) => (StatusCode::OK, Json(json!({ "valid": true }))).into_response(),
        Ok(false) => {
            warn!("Rejected access code attempt");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": INVALID_CODE_MESSAGE, "valid": false })),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

fn check_access_code(state: &AppState, body: &[u8]) -> ApiResult<bool> {
    let expected = state
        .access_code
        .as_deref()
        .ok_or_else(|| AnalysisError::Configuration("ACCESS_CODE is not set".to_string()))?;

    let request: AccessCodeRequest = parse_body(body)?;
    require_non_empty("code", &request.code)?;

    Ok(codes_match(&request.code, expected))
}

pub async fn request_access(State(state): State<AppState>, body: Bytes) -> Response {
    match send_access_request(&state, &body).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn send_access_request(state: &AppState, body: &[u8]) -> ApiResult<()> {
    let request: AccessRequest = parse_body(body)?;
    require_non_empty("name", &request.name)?;
    require_non_empty("email", &request.email)?;
    if !is_plausible_email(&request.email) {
        return Err(ValidationError::Invalid("Indirizzo email non valido".to_string()).into());
    }

    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| AnalysisError::Configuration("email delivery is not set up".to_string()))?;

    mailer.send_access_request(&request).await?;
    info!("Forwarded access request");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_ignores_surrounding_whitespace() {
        assert!(codes_match(" PULSE-2024 ", "PULSE-2024"));
        assert!(!codes_match("pulse-2024", "PULSE-2024"));
        assert!(!codes_match("", "PULSE-2024"));
    }
}
