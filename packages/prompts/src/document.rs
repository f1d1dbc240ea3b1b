// ABOUTME: Prompts for extracting profile data from uploaded documents
// ABOUTME: Schema and requested fields change with the profile type (privato, freelance, azienda)

use pulse_core::{DocumentExtractionRequest, ProfileType};

use crate::{bounded_text, render, PromptPair, JSON_ONLY_RULE};

const PRIVATO_FIELDS: &[(&str, &str)] = &[
    ("full_name", "nome e cognome"),
    ("tax_code", "codice fiscale"),
    ("birth_date", "data di nascita in formato YYYY-MM-DD"),
    ("address", "indirizzo di residenza"),
    ("city", "comune di residenza"),
    ("employer", "datore di lavoro"),
    ("annual_income", "reddito annuo lordo in euro, come numero"),
    ("marital_status", "stato civile"),
    ("dependents", "numero di familiari a carico, come numero"),
];

const FREELANCE_FIELDS: &[(&str, &str)] = &[
    ("full_name", "nome e cognome"),
    ("tax_code", "codice fiscale"),
    ("vat_number", "partita IVA"),
    ("profession", "attività professionale"),
    ("tax_regime", "regime fiscale (es. forfettario, ordinario)"),
    ("annual_revenue", "fatturato annuo in euro, come numero"),
    ("address", "indirizzo dello studio o domicilio fiscale"),
    ("city", "comune"),
    ("pec", "indirizzo PEC"),
];

const AZIENDA_FIELDS: &[(&str, &str)] = &[
    ("company_name", "ragione sociale"),
    ("vat_number", "partita IVA"),
    ("tax_code", "codice fiscale dell'azienda"),
    ("legal_form", "forma giuridica (es. SRL, SPA, SNC)"),
    ("sector", "settore di attività"),
    ("ateco_code", "codice ATECO"),
    ("address", "sede legale"),
    ("city", "comune della sede legale"),
    ("employees", "numero di dipendenti, come numero"),
    ("annual_revenue", "fatturato annuo in euro, come numero"),
    ("founded_year", "anno di costituzione, come numero"),
    ("pec", "indirizzo PEC"),
];

const SYSTEM_TEMPLATE: &str = "Sei un assistente che estrae dati anagrafici e fiscali \
da documenti italiani per un profilo di tipo {{profile}}. Estrai SOLO le informazioni \
presenti nel testo: se un campo non compare, impostalo a null. Non dedurre e non \
completare valori mancanti.

Schema di output:
{{schema}}

Aggiungi sempre il campo \"confidence\" (numero da 0 a 1) che indica quanto sei sicuro \
dell'estrazione complessiva e il campo \"notes\" con eventuali osservazioni.

{{json_rule}}";

const USER_TEMPLATE: &str = "Estrai i seguenti campi dal documento:
{{fields}}

DOCUMENTO:
\"\"\"
{{document}}
\"\"\"";

/// Field names of the extraction schema for a profile type
pub fn extraction_fields(profile: ProfileType) -> Vec<&'static str> {
    field_specs(profile).iter().map(|(name, _)| *name).collect()
}

fn field_specs(profile: ProfileType) -> &'static [(&'static str, &'static str)] {
    match profile {
        ProfileType::Privato => PRIVATO_FIELDS,
        ProfileType::Freelance => FREELANCE_FIELDS,
        ProfileType::Azienda => AZIENDA_FIELDS,
    }
}

fn schema_block(profile: ProfileType) -> String {
    let lines: Vec<String> = field_specs(profile)
        .iter()
        .map(|(name, _)| format!("  \"{}\": ...", name))
        .chain([
            "  \"confidence\": 0.0".to_string(),
            "  \"notes\": \"...\"".to_string(),
        ])
        .collect();
    format!("{{\n{}\n}}", lines.join(",\n"))
}

fn field_list(profile: ProfileType) -> String {
    field_specs(profile)
        .iter()
        .map(|(name, description)| format!("- {}: {}", name, description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the extraction prompt for the request's profile type
pub fn document_extraction_prompt(request: &DocumentExtractionRequest) -> PromptPair {
    let profile = request.profile();
    let system = render(
        SYSTEM_TEMPLATE,
        &[
            ("profile", profile.as_str()),
            ("schema", &schema_block(profile)),
            ("json_rule", JSON_ONLY_RULE),
        ],
    );
    let user = render(
        USER_TEMPLATE,
        &[
            ("fields", &field_list(profile)),
            ("document", bounded_text(&request.document_text)),
        ],
    );
    PromptPair::new(system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::MAX_PROMPT_TEXT_CHARS;

    fn request(profile: Option<&str>, text: &str) -> DocumentExtractionRequest {
        DocumentExtractionRequest {
            profile_type: profile.map(str::to_string),
            document_text: text.to_string(),
        }
    }

    #[test]
    fn test_schema_changes_with_profile_type() {
        let privato = document_extraction_prompt(&request(Some("privato"), "testo"));
        let azienda = document_extraction_prompt(&request(Some("azienda"), "testo"));

        assert!(privato.system.contains("\"marital_status\""));
        assert!(!privato.system.contains("\"ateco_code\""));
        assert!(azienda.system.contains("\"ateco_code\""));
        assert!(azienda.user.contains("- legal_form:"));
        assert!(!azienda.user.contains("- marital_status:"));
    }

    #[test]
    fn test_freelance_requests_vat_and_regime() {
        let prompt = document_extraction_prompt(&request(Some("freelance"), "testo"));
        assert!(prompt.user.contains("- vat_number: partita IVA"));
        assert!(prompt.user.contains("- tax_regime:"));
        assert!(prompt.system.contains("profilo di tipo freelance"));
    }

    #[test]
    fn test_unknown_profile_uses_company_schema() {
        let prompt = document_extraction_prompt(&request(Some("cooperativa"), "testo"));
        assert!(prompt.system.contains("profilo di tipo azienda"));
    }

    #[test]
    fn test_document_text_is_embedded_and_truncated() {
        let text = format!("INIZIO{}", "x".repeat(MAX_PROMPT_TEXT_CHARS * 2));
        let prompt = document_extraction_prompt(&request(None, &text));
        assert!(prompt.user.contains("INIZIO"));
        assert!(prompt.user.len() < MAX_PROMPT_TEXT_CHARS + 2_000);
    }

    #[test]
    fn test_extraction_fields_match_schema() {
        let fields = extraction_fields(ProfileType::Privato);
        assert_eq!(fields.first(), Some(&"full_name"));
        assert_eq!(fields.len(), PRIVATO_FIELDS.len());
    }

    #[test]
    fn test_no_placeholders_left() {
        for profile in ["privato", "freelance", "azienda"] {
            let prompt = document_extraction_prompt(&request(Some(profile), "testo"));
            assert!(!prompt.system.contains("{{"));
            assert!(!prompt.user.contains("{{"));
        }
    }
}
