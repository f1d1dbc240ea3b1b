// ABOUTME: HR consultant kind: hiring and contract advice for a role
// ABOUTME: Any parsed object is accepted; the fallback carries empty advice lists

use serde_json::{json, Value};

use pulse_ai::SamplingParams;
use pulse_core::{HrConsultantRequest, ValidationResult};
use pulse_prompts::{hr_consultant_prompt, PromptPair};

use super::{AnalysisKind, UNAVAILABLE_SUMMARY};

pub struct HrConsultant;

impl AnalysisKind for HrConsultant {
    type Request = HrConsultantRequest;

    const NAME: &'static str = "hr-consultant";
    const RESULT_KEY: Option<&'static str> = Some("advice");

    fn validate(request: &Self::Request) -> ValidationResult<()> {
        request.validate()
    }

    fn build_prompt(request: &Self::Request) -> PromptPair {
        hr_consultant_prompt(request)
    }

    fn sampling() -> SamplingParams {
        SamplingParams::new(0.5, 1500)
    }

    fn fallback(_request: &Self::Request) -> Value {
        json!({
            "summary": UNAVAILABLE_SUMMARY,
            "recommendations": [],
            "contract_notes": [],
            "cost_considerations": [],
            "risks": []
        })
    }
}
