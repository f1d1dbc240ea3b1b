// ABOUTME: Prompts for matching public tenders against a company profile
// ABOUTME: Each tender gets a 0-100 fit score and a short rationale

use pulse_core::TenderAnalysisRequest;
use serde_json::Value;

use crate::{pretty_json, render, PromptPair, JSON_ONLY_RULE};

const SYSTEM_TEMPLATE: &str = "Sei un esperto di appalti pubblici italiani. Valuti \
quanto ciascun bando è adatto all'azienda descritta, considerando settore, \
dimensione, requisiti tecnici ed economici e scadenze.

Per ogni bando restituisci un punteggio \"score\" da 0 a 100 e una motivazione \
sintetica. Usa come \"tender_id\" il campo \"id\" del bando quando presente.

Schema di output:
{
  \"summary\": \"...\",
  \"matches\": [
    { \"tender_id\": \"...\", \"title\": \"...\", \"score\": 0, \"rationale\": \"...\" }
  ],
  \"recommendations\": [\"...\"]
}

{{json_rule}}";

const USER_TEMPLATE: &str = "Profilo aziendale:
{{profile}}

Bandi da valutare ({{count}}):
{{tenders}}";

/// Build the tender matching prompt from the bounded tender list
pub fn tender_analysis_prompt(request: &TenderAnalysisRequest) -> PromptPair {
    let tenders = request.bounded_tenders();
    let system = render(SYSTEM_TEMPLATE, &[("json_rule", JSON_ONLY_RULE)]);
    let user = render(
        USER_TEMPLATE,
        &[
            ("profile", &pretty_json(&request.company_profile)),
            ("count", &tenders.len().to_string()),
            ("tenders", &pretty_json(&Value::Array(tenders.to_vec()))),
        ],
    );
    PromptPair::new(system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::MAX_TENDERS;
    use serde_json::json;

    #[test]
    fn test_tender_prompt_lists_tenders() {
        let request = TenderAnalysisRequest {
            company_profile: json!({"name": "Edil Srl", "sector": "costruzioni"}),
            tenders: vec![
                json!({"id": "T-1", "title": "Manutenzione strade"}),
                json!({"id": "T-2", "title": "Fornitura arredi"}),
            ],
        };
        let prompt = tender_analysis_prompt(&request);
        assert!(prompt.user.contains("Bandi da valutare (2):"));
        assert!(prompt.user.contains("Manutenzione strade"));
        assert!(prompt.user.contains("\"sector\": \"costruzioni\""));
    }

    #[test]
    fn test_tender_prompt_is_bounded() {
        let request = TenderAnalysisRequest {
            company_profile: json!({"name": "Edil Srl"}),
            tenders: (0..60).map(|i| json!({"id": format!("T-{}", i)})).collect(),
        };
        let prompt = tender_analysis_prompt(&request);
        assert!(prompt
            .user
            .contains(&format!("Bandi da valutare ({}):", MAX_TENDERS)));
        assert!(!prompt.user.contains("\"T-59\""));
    }
}
