// ABOUTME: Tender analysis kind: scores public tenders against the company profile
// ABOUTME: Parsed output must carry a `matches` array, otherwise the fallback is used

use serde_json::{json, Value};

use pulse_ai::SamplingParams;
use pulse_core::{TenderAnalysisRequest, ValidationResult};
use pulse_prompts::{tender_analysis_prompt, PromptPair};

use super::{AnalysisKind, UNAVAILABLE_SUMMARY};

pub struct TenderAnalysis;

impl AnalysisKind for TenderAnalysis {
    type Request = TenderAnalysisRequest;

    const NAME: &'static str = "analyze-tenders";
    const RESULT_KEY: Option<&'static str> = Some("analysis");

    fn validate(request: &Self::Request) -> ValidationResult<()> {
        request.validate()
    }

    fn build_prompt(request: &Self::Request) -> PromptPair {
        tender_analysis_prompt(request)
    }

    fn sampling() -> SamplingParams {
        SamplingParams::new(0.3, 2500)
    }

    fn fallback(_request: &Self::Request) -> Value {
        json!({
            "summary": UNAVAILABLE_SUMMARY,
            "matches": [],
            "recommendations": []
        })
    }

    fn accepts(value: &Value) -> bool {
        value.is_object() && value.get("matches").is_some_and(Value::is_array)
    }
}
