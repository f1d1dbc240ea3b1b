// ABOUTME: Document extraction kind: pulls profile fields out of uploaded document text
// ABOUTME: Fallback sets every schema field of the requested profile type to null

use serde_json::{json, Map, Value};

use pulse_ai::SamplingParams;
use pulse_core::{DocumentExtractionRequest, ValidationResult};
use pulse_prompts::{document::extraction_fields, document_extraction_prompt, PromptPair};

use super::{AnalysisKind, UNAVAILABLE_SUMMARY};

pub struct DocumentExtraction;

impl AnalysisKind for DocumentExtraction {
    type Request = DocumentExtractionRequest;

    const NAME: &'static str = "extract-document";
    const RESULT_KEY: Option<&'static str> = Some("extracted");

    fn validate(request: &Self::Request) -> ValidationResult<()> {
        request.validate()
    }

    fn build_prompt(request: &Self::Request) -> PromptPair {
        document_extraction_prompt(request)
    }

    fn sampling() -> SamplingParams {
        SamplingParams::new(0.1, 1500)
    }

    fn fallback(request: &Self::Request) -> Value {
        let mut fields: Map<String, Value> = extraction_fields(request.profile())
            .into_iter()
            .map(|name| (name.to_string(), Value::Null))
            .collect();
        fields.insert("confidence".to_string(), json!(0));
        fields.insert("notes".to_string(), json!(UNAVAILABLE_SUMMARY));
        Value::Object(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(profile: &str) -> DocumentExtractionRequest {
        DocumentExtractionRequest {
            profile_type: Some(profile.to_string()),
            document_text: "x".repeat(60),
        }
    }

    #[test]
    fn test_fallback_follows_profile_schema() {
        let privato = DocumentExtraction::fallback(&request("privato"));
        assert_eq!(privato["full_name"], Value::Null);
        assert!(privato.get("marital_status").is_some());
        assert!(privato.get("vat_number").is_none());
        assert_eq!(privato["confidence"], 0);

        let azienda = DocumentExtraction::fallback(&request("azienda"));
        assert!(azienda.get("company_name").is_some());
        assert!(azienda.get("ateco_code").is_some());
        assert_eq!(azienda["notes"], UNAVAILABLE_SUMMARY);
    }

    #[test]
    fn test_accepts_any_object() {
        assert!(DocumentExtraction::accepts(&json!({"full_name": "Mario Rossi"})));
        assert!(!DocumentExtraction::accepts(&json!(["Mario Rossi"])));
    }
}
