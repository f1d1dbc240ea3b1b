// ABOUTME: Prediction kind for the dashboard: six-month trend, health score and drivers
// ABOUTME: Trend length and score range are checked; anything else falls back to neutral values

use serde_json::{json, Value};

use pulse_ai::SamplingParams;
use pulse_core::{PredictionRequest, ValidationResult};
use pulse_prompts::{predictions_prompt, PromptPair};

use super::{is_score, is_trend, neutral_trend, AnalysisKind, NEUTRAL_SCORE, UNAVAILABLE_SUMMARY};

pub struct Predictions;

impl AnalysisKind for Predictions {
    type Request = PredictionRequest;

    const NAME: &'static str = "generate-predictions";
    const RESULT_KEY: Option<&'static str> = Some("predictions");

    fn validate(request: &Self::Request) -> ValidationResult<()> {
        request.validate()
    }

    fn build_prompt(request: &Self::Request) -> PromptPair {
        predictions_prompt(request)
    }

    fn sampling() -> SamplingParams {
        SamplingParams::new(0.4, 1500)
    }

    fn fallback(_request: &Self::Request) -> Value {
        json!({
            "trend": neutral_trend(),
            "overall_score": NEUTRAL_SCORE,
            "summary": UNAVAILABLE_SUMMARY,
            "opportunities": [],
            "risks": [],
            "recommendations": []
        })
    }

    fn accepts(value: &Value) -> bool {
        value.is_object() && is_trend(value.get("trend")) && is_score(value.get("overall_score"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_trend_has_six_numbers() {
        let fallback = Predictions::fallback(&PredictionRequest::default());
        let trend = fallback["trend"].as_array().unwrap();
        assert_eq!(trend.len(), 6);
        assert!(trend.iter().all(Value::is_number));
        assert_eq!(fallback["overall_score"], 50);
        assert!(Predictions::accepts(&fallback));
    }

    #[test]
    fn test_rejects_short_trend() {
        assert!(!Predictions::accepts(&json!({
            "trend": [50, 52, 54, 53],
            "overall_score": 55
        })));
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        assert!(!Predictions::accepts(&json!({
            "trend": [50, 52, 54, 53, 55, 57],
            "overall_score": 140
        })));
    }
}
