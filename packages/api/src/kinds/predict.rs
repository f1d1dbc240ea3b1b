// ABOUTME: Legacy company scoring kind, answered with the bare prediction object
// ABOUTME: Same trend and score checks as the dashboard predictions, plus a commentary object

use serde_json::{json, Value};

use pulse_ai::SamplingParams;
use pulse_core::{LegacyPredictRequest, ValidationResult};
use pulse_prompts::{legacy_predict_prompt, PromptPair};

use super::{is_score, is_trend, neutral_trend, AnalysisKind, NEUTRAL_SCORE, UNAVAILABLE_SUMMARY};

pub struct LegacyPredict;

impl AnalysisKind for LegacyPredict {
    type Request = LegacyPredictRequest;

    const NAME: &'static str = "predict";
    const RESULT_KEY: Option<&'static str> = None;

    fn validate(request: &Self::Request) -> ValidationResult<()> {
        request.validate()
    }

    fn build_prompt(request: &Self::Request) -> PromptPair {
        legacy_predict_prompt(request)
    }

    fn sampling() -> SamplingParams {
        SamplingParams::new(0.3, 800)
    }

    fn fallback(_request: &Self::Request) -> Value {
        json!({
            "trend": neutral_trend(),
            "overall_score": NEUTRAL_SCORE,
            "commentary": {
                "summary": UNAVAILABLE_SUMMARY,
                "drivers_positive": [],
                "drivers_negative": []
            }
        })
    }

    fn accepts(value: &Value) -> bool {
        value.is_object()
            && is_trend(value.get("trend"))
            && is_score(value.get("overall_score"))
            && value.get("commentary").is_some_and(Value::is_object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_reference_completion() {
        let value: Value = serde_json::from_str(
            "{\"trend\":[50,52,54,53,55,57],\"overall_score\":55,\"commentary\":{\"summary\":\"...\",\"drivers_positive\":[\"a\"],\"drivers_negative\":[\"b\"]}}",
        )
        .unwrap();
        assert!(LegacyPredict::accepts(&value));
    }

    #[test]
    fn test_rejects_missing_commentary() {
        assert!(!LegacyPredict::accepts(&json!({
            "trend": [50, 52, 54, 53, 55, 57],
            "overall_score": 55
        })));
    }

    #[test]
    fn test_fallback_shape() {
        let fallback = LegacyPredict::fallback(&LegacyPredictRequest::default());
        assert!(LegacyPredict::accepts(&fallback));
        assert_eq!(fallback["commentary"]["drivers_positive"], json!([]));
    }
}
