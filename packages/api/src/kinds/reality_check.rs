// ABOUTME: Reality check kind: SWOT, resilience score, suggestions and sector benchmarks
// ABOUTME: Requires a swot object and a 0-100 resilience score in parsed output

use serde_json::{json, Value};

use pulse_ai::SamplingParams;
use pulse_core::{RealityCheckRequest, ValidationResult};
use pulse_prompts::{reality_check_prompt, PromptPair};

use super::{is_score, AnalysisKind, NEUTRAL_SCORE, UNAVAILABLE_SUMMARY};

pub struct RealityCheck;

impl AnalysisKind for RealityCheck {
    type Request = RealityCheckRequest;

    const NAME: &'static str = "reality-check";
    const RESULT_KEY: Option<&'static str> = Some("insights");

    fn validate(request: &Self::Request) -> ValidationResult<()> {
        request.validate()
    }

    fn build_prompt(request: &Self::Request) -> PromptPair {
        reality_check_prompt(request)
    }

    fn sampling() -> SamplingParams {
        SamplingParams::new(0.5, 2000)
    }

    fn fallback(_request: &Self::Request) -> Value {
        json!({
            "summary": UNAVAILABLE_SUMMARY,
            "swot": {
                "strengths": [],
                "weaknesses": [],
                "opportunities": [],
                "threats": []
            },
            "resilience": NEUTRAL_SCORE,
            "suggestions": [],
            "benchmarks": []
        })
    }

    fn accepts(value: &Value) -> bool {
        value.is_object()
            && value.get("swot").is_some_and(Value::is_object)
            && is_score(value.get("resilience"))
    }
}
