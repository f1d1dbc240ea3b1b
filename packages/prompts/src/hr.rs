// ABOUTME: Prompts for the HR consultant endpoint
// ABOUTME: Hiring and contract advice for a role, without inventing salaries or costs

use pulse_core::HrConsultantRequest;

use crate::{bounded_text, optional_text, render, PromptPair, JSON_ONLY_RULE, NO_FABRICATION_RULE};

const SYSTEM_TEMPLATE: &str = "Sei un consulente HR esperto del mercato del lavoro \
italiano e dei contratti collettivi nazionali. Fornisci consigli pratici per \
l'inserimento di una nuova figura in azienda.

{{no_fabrication}}
Non indicare retribuzioni, costi aziendali o aliquote se non sono stati forniti: \
descrivi invece quali voci considerare.

Schema di output:
{
  \"summary\": \"...\",
  \"recommendations\": [\"...\"],
  \"contract_notes\": [\"...\"],
  \"cost_considerations\": [\"...\"],
  \"risks\": [\"...\"]
}

{{json_rule}}";

const USER_TEMPLATE: &str = "Ruolo da inserire: {{role}}
Tipologia di contratto: {{contract}}
Settore: {{sector}}
Contesto aziendale: {{context}}
Domanda specifica: {{question}}";

/// Build the HR advice prompt
pub fn hr_consultant_prompt(request: &HrConsultantRequest) -> PromptPair {
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
            ("role", bounded_text(&request.role)),
            ("contract", bounded_text(&request.contract_type)),
            ("sector", optional_text(request.sector.as_deref())),
            ("context", optional_text(request.company_context.as_deref())),
            ("question", optional_text(request.question.as_deref())),
        ],
    );
    PromptPair::new(system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::MAX_PROMPT_TEXT_CHARS;

    #[test]
    fn test_hr_prompt_embeds_role_and_contract() {
        let request = HrConsultantRequest {
            role: "Commerciale estero".to_string(),
            contract_type: "apprendistato".to_string(),
            sector: Some("meccanica".to_string()),
            company_context: None,
            question: Some("Conviene un periodo di prova lungo?".to_string()),
        };
        let prompt = hr_consultant_prompt(&request);
        assert!(prompt.user.contains("Ruolo da inserire: Commerciale estero"));
        assert!(prompt.user.contains("Tipologia di contratto: apprendistato"));
        assert!(prompt.user.contains("Contesto aziendale: non specificato"));
        assert!(prompt.user.contains("Conviene un periodo di prova lungo?"));
    }

    #[test]
    fn test_hr_prompt_keeps_placeholder_like_text_verbatim() {
        let request = HrConsultantRequest {
            role: "{{context}}".repeat(500),
            contract_type: "determinato".to_string(),
            sector: None,
            company_context: Some("c".repeat(MAX_PROMPT_TEXT_CHARS)),
            question: None,
        };
        let prompt = hr_consultant_prompt(&request);
        assert!(prompt
            .user
            .contains(&format!("Ruolo da inserire: {}", "{{context}}".repeat(500))));
        assert!(prompt.user.chars().count() < 5_500 + MAX_PROMPT_TEXT_CHARS + 500);
    }

    #[test]
    fn test_hr_prompt_bounds_role_and_contract() {
        let request = HrConsultantRequest {
            role: "r".repeat(50_000),
            contract_type: "t".repeat(50_000),
            ..HrConsultantRequest::default()
        };
        let prompt = hr_consultant_prompt(&request);
        assert!(prompt.user.chars().count() < 2 * MAX_PROMPT_TEXT_CHARS + 500);
    }

    #[test]
    fn test_hr_prompt_forbids_invented_costs() {
        let prompt = hr_consultant_prompt(&HrConsultantRequest::default());
        assert!(prompt.system.contains(NO_FABRICATION_RULE));
        assert!(prompt.system.contains("Non indicare retribuzioni"));
    }
}
