// ABOUTME: Prompts for the reality check (SWOT, resilience, suggestions, benchmarks)
// ABOUTME: Combines the sector with the free-text company description

use pulse_core::RealityCheckRequest;

use crate::{bounded_text, pretty_json, render, PromptPair, JSON_ONLY_RULE};

const SYSTEM_TEMPLATE: &str = "Sei un consulente strategico che esegue un \"reality \
check\" onesto e concreto su un'impresa italiana. Evidenzia anche i punti deboli: il \
tuo obiettivo è aiutare l'imprenditore a vedere la propria azienda con realismo.

\"resilience\" è un punteggio 0-100 della capacità dell'azienda di assorbire shock. \
I \"benchmarks\" descrivono in modo qualitativo come si posizionano le aziende \
comparabili del settore.

Schema di output:
{
  \"summary\": \"...\",
  \"swot\": {
    \"strengths\": [\"...\"],
    \"weaknesses\": [\"...\"],
    \"opportunities\": [\"...\"],
    \"threats\": [\"...\"]
  },
  \"resilience\": 0,
  \"suggestions\": [\"...\"],
  \"benchmarks\": [\"...\"]
}

{{json_rule}}";

const USER_TEMPLATE: &str = "Settore: {{sector}}

Descrizione dell'azienda:
{{context}}
{{profile}}";

/// Build the reality check prompt
pub fn reality_check_prompt(request: &RealityCheckRequest) -> PromptPair {
    let system = render(SYSTEM_TEMPLATE, &[("json_rule", JSON_ONLY_RULE)]);
    let profile = match &request.company_profile {
        Some(profile) if profile.is_object() => {
            format!("\nDati del profilo aziendale:\n{}", pretty_json(profile))
        }
        _ => String::new(),
    };
    let user = render(
        USER_TEMPLATE,
        &[
            ("sector", bounded_text(&request.sector)),
            ("context", bounded_text(&request.company_context)),
            ("profile", &profile),
        ],
    );
    PromptPair::new(system, user)
}
