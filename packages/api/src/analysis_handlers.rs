// ABOUTME: Generic handler shared by every analysis endpoint
// ABOUTME: parse body -> validate -> build prompt -> one gateway call -> normalize -> wrap

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use pulse_ai::{normalize_completion, ChatGateway, ChatRequest};

use crate::error::{AnalysisError, ApiResult};
use crate::kinds::{wrap_result, AnalysisKind};
use crate::state::AppState;

/// Deserialize a request body. An empty body reads as `{}` so that field
/// validation reports which field is missing.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| AnalysisError::InvalidBody(e.to_string()))
}

/// Run one analysis of kind `K` against the gateway and return the wrapped result
pub async fn run_analysis<K: AnalysisKind>(
    gateway: &dyn ChatGateway,
    model: &str,
    body: &[u8],
) -> ApiResult<Value> {
    let request: K::Request = parse_body(body)?;
    K::validate(&request)?;

    let prompt = K::build_prompt(&request);
    let chat = ChatRequest::new(model, prompt.system, prompt.user, K::sampling());

    info!("Running {} analysis with model {}", K::NAME, model);
    let completion = gateway.send(&chat).await?;

    let normalized = normalize_completion(
        &completion.content,
        || K::fallback(&request),
        |value| K::accepts(value),
    );
    if let Some(reason) = normalized.fallback {
        warn!(
            kind = K::NAME,
            reason = ?reason,
            "Returning fallback result for unusable completion"
        );
    }

    Ok(wrap_result::<K>(normalized.value))
}

/// Axum entry point for an analysis kind
pub async fn analyze<K: AnalysisKind>(State(state): State<AppState>, body: Bytes) -> Response {
    match run_analysis::<K>(state.gateway.as_ref(), &state.model, &body).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// CORS preflight; the CORS layer adds the headers
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
