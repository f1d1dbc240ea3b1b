// ABOUTME: Prompt for the legacy company scoring widget
// ABOUTME: Turns a company snapshot into a trend, an overall score and a commentary

use pulse_core::LegacyPredictRequest;
use serde_json::Value;

use crate::{bounded_text, render, PromptPair, JSON_ONLY_RULE, NO_FABRICATION_RULE};

const SYSTEM_TEMPLATE: &str = "Sei un analista che valuta la traiettoria di un'azienda \
a partire da pochi indicatori.

{{no_fabrication}}

Restituisci:
- \"trend\": esattamente 6 numeri (indice 0-100) per i prossimi sei mesi;
- \"overall_score\": punteggio 0-100;
- \"commentary\": oggetto con \"summary\", \"drivers_positive\" e \"drivers_negative\".

{{json_rule}}";

const USER_TEMPLATE: &str = "Dati azienda:
- dimensione (dipendenti): {{size}}
- settore: {{industry}}
- paese: {{country}}
- soci: {{partners}}
- storico fatturato: {{revenue_history}}
- storico dipendenti: {{employees_history}}";

fn number_or_unknown(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => v.to_string(),
        None => "non disponibile".to_string(),
    }
}

fn history_or_unknown(history: &[Value]) -> String {
    if history.is_empty() {
        "non disponibile".to_string()
    } else {
        bounded_text(&Value::Array(history.to_vec()).to_string()).to_string()
    }
}

/// Build the scoring prompt from the company snapshot
pub fn legacy_predict_prompt(request: &LegacyPredictRequest) -> PromptPair {
    let company = &request.company;
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
            ("size", &number_or_unknown(company.size)),
            ("industry", bounded_text(&company.industry)),
            (
                "country",
                company
                    .country
                    .as_deref()
                    .map(bounded_text)
                    .unwrap_or("non disponibile"),
            ),
            ("partners", &number_or_unknown(company.partners)),
            ("revenue_history", &history_or_unknown(&company.revenue_history)),
            ("employees_history", &history_or_unknown(&company.employees_history)),
        ],
    );
    PromptPair::new(system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::{CompanySnapshot, MAX_PROMPT_TEXT_CHARS};
    use serde_json::json;

    #[test]
    fn test_prompt_lists_snapshot_fields() {
        let request = LegacyPredictRequest {
            company: CompanySnapshot {
                size: Some(42.0),
                industry: "software".to_string(),
                country: Some("Italy".to_string()),
                partners: Some(2.0),
                revenue_history: vec![json!(120000), json!(150000)],
                employees_history: vec![],
            },
        };
        let prompt = legacy_predict_prompt(&request);
        assert!(prompt.user.contains("dimensione (dipendenti): 42"));
        assert!(prompt.user.contains("settore: software"));
        assert!(prompt.user.contains("storico fatturato: [120000,150000]"));
        assert!(prompt.user.contains("storico dipendenti: non disponibile"));
        assert!(prompt.system.contains(NO_FABRICATION_RULE));
    }

    #[test]
    fn test_prompt_bounds_free_text_fields() {
        let request = LegacyPredictRequest {
            company: CompanySnapshot {
                industry: "i".repeat(50_000),
                country: Some("c".repeat(50_000)),
                ..CompanySnapshot::default()
            },
        };
        let prompt = legacy_predict_prompt(&request);
        assert!(prompt.user.chars().count() < 2 * MAX_PROMPT_TEXT_CHARS + 500);
    }

    #[test]
    fn test_number_or_unknown() {
        assert_eq!(number_or_unknown(Some(3.0)), "3");
        assert_eq!(number_or_unknown(Some(2.5)), "2.5");
        assert_eq!(number_or_unknown(None), "non disponibile");
    }
}
