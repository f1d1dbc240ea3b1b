// ABOUTME: Prompts for the dashboard's six-month business predictions
// ABOUTME: Works only from the supplied company profile and never invents figures

use pulse_core::PredictionRequest;

use crate::{optional_text, pretty_json, render, PromptPair, JSON_ONLY_RULE, NO_FABRICATION_RULE};

const SYSTEM_TEMPLATE: &str = "Sei un analista di business che produce previsioni \
qualitative a sei mesi per piccole e medie imprese italiane.

{{no_fabrication}}

Il campo \"trend\" è un indice relativo (0-100, 50 = stabilità) per ciascuno dei \
prossimi sei mesi, non un valore economico. \"overall_score\" è un punteggio 0-100 \
sullo stato di salute complessivo.

Schema di output:
{
  \"trend\": [n1, n2, n3, n4, n5, n6],
  \"overall_score\": 0,
  \"summary\": \"...\",
  \"opportunities\": [\"...\"],
  \"risks\": [\"...\"],
  \"recommendations\": [\"...\"]
}

{{json_rule}}";

const USER_TEMPLATE: &str = "Profilo aziendale:
{{profile}}

Settore: {{sector}}
Note aggiuntive: {{notes}}

Genera le previsioni per i prossimi sei mesi.";

/// Build the prediction prompt from the company profile
pub fn predictions_prompt(request: &PredictionRequest) -> PromptPair {
    let system = render(
        SYSTEM_TEMPLATE,
        &[
            ("no_fabrication", NO_FABRICATION_RULE),
            ("json_rule", JSON_ONLY_RULE),
        ],
    );
    let user = render(
        USER_TEMPLATE,
        &[
            ("profile", &pretty_json(&request.company_profile)),
            ("sector", optional_text(request.sector.as_deref())),
            ("notes", optional_text(request.notes.as_deref())),
        ],
    );
    PromptPair::new(system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_prompt_forbids_invented_figures() {
        let prompt = predictions_prompt(&PredictionRequest::default());
        assert!(prompt.system.contains(NO_FABRICATION_RULE));
        assert!(prompt.system.contains("\"trend\": [n1, n2, n3, n4, n5, n6]"));
    }

    #[test]
    fn test_user_prompt_embeds_profile_and_sector() {
        let request = PredictionRequest {
            company_profile: json!({"name": "Trattoria Da Gino", "employees": 7}),
            sector: Some("ristorazione".to_string()),
            notes: None,
        };
        let prompt = predictions_prompt(&request);
        assert!(prompt.user.contains("\"name\": \"Trattoria Da Gino\""));
        assert!(prompt.user.contains("Settore: ristorazione"));
        assert!(prompt.user.contains("Note aggiuntive: non specificato"));
    }
}
