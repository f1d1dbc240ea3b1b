// ABOUTME: Strategy trait describing one analysis kind and its implementations
// ABOUTME: Each kind supplies its payload type, prompt, sampling, result key, fallback and shape check

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use pulse_ai::SamplingParams;
use pulse_core::ValidationResult;
use pulse_prompts::PromptPair;

pub mod document;
pub mod hr;
pub mod predict;
pub mod predictions;
pub mod reality_check;
pub mod tender;

pub use document::DocumentExtraction;
pub use hr::HrConsultant;
pub use predict::LegacyPredict;
pub use predictions::Predictions;
pub use reality_check::RealityCheck;
pub use tender::TenderAnalysis;

/// Summary placed in every fallback object
pub const UNAVAILABLE_SUMMARY: &str = "Analisi non disponibile al momento: il modello non ha \
restituito un risultato leggibile. Riprova tra qualche minuto.";

/// Neutral index value used for fallback trends and scores
pub const NEUTRAL_SCORE: u8 = 50;

/// Number of monthly points in a trend
pub const TREND_MONTHS: usize = 6;

/// One analysis endpoint: everything the generic handler needs to know about it
pub trait AnalysisKind: Send + Sync + 'static {
    type Request: DeserializeOwned + Send + Sync;

    /// Route segment and log label
    const NAME: &'static str;

    /// Top-level key wrapping the result; `None` returns the bare object
    const RESULT_KEY: Option<&'static str>;

    fn validate(request: &Self::Request) -> ValidationResult<()>;

    fn build_prompt(request: &Self::Request) -> PromptPair;

    fn sampling() -> SamplingParams;

    /// Schema-valid object substituted when the completion is unusable
    fn fallback(request: &Self::Request) -> Value;

    /// Shape check applied to successfully parsed completions
    fn accepts(value: &Value) -> bool {
        value.is_object()
    }
}

/// Wrap a normalized result under the kind's key
pub fn wrap_result<K: AnalysisKind>(value: Value) -> Value {
    match K::RESULT_KEY {
        Some(key) => json!({ key: value }),
        None => value,
    }
}

pub(crate) fn neutral_trend() -> Value {
    Value::Array(vec![json!(NEUTRAL_SCORE); TREND_MONTHS])
}

pub(crate) fn is_score(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_f64)
        .is_some_and(|v| (0.0..=100.0).contains(&v))
}

pub(crate) fn is_trend(value: Option<&Value>) -> bool {
    match value.and_then(Value::as_array) {
        Some(points) => points.len() == TREND_MONTHS && points.iter().all(Value::is_number),
        None => false,
    }
}
