// ABOUTME: Prompt builder for the Pulse analysis endpoints
// ABOUTME: Maps each validated request payload to a system prompt and a user prompt

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

use pulse_core::{truncate, MAX_PROMPT_TEXT_CHARS};

pub mod document;
pub mod hr;
pub mod predict;
pub mod predictions;
pub mod reality_check;
pub mod tender;

pub use document::document_extraction_prompt;
pub use hr::hr_consultant_prompt;
pub use predict::legacy_predict_prompt;
pub use predictions::predictions_prompt;
pub use reality_check::reality_check_prompt;
pub use tender::tender_analysis_prompt;

/// Rule shared by every prompt that deals with money, headcount or scores.
pub const NO_FABRICATION_RULE: &str = "Non inventare mai cifre, percentuali, importi o \
dati quantitativi che non siano presenti nelle informazioni fornite. Se un dato numerico \
manca, dichiaralo esplicitamente invece di stimarlo.";

/// Appended to every system prompt so the normalizer finds a single object.
pub const JSON_ONLY_RULE: &str = "Rispondi esclusivamente con un singolo oggetto JSON \
valido, senza testo prima o dopo e senza commenti.";

/// System and user prompt for one gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{(\w+)\}\}").expect("placeholder regex is valid");
}

/// Replace `{{key}}` placeholders in a template in a single pass.
/// Substituted values are never scanned again, so caller text is kept verbatim.
pub fn render(template: &str, parameters: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            parameters
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Caller-supplied free text, bounded to the prompt size limit
pub fn bounded_text(text: &str) -> &str {
    truncate(text.trim(), MAX_PROMPT_TEXT_CHARS)
}

/// Optional free text rendered as a placeholder-friendly string
pub(crate) fn optional_text(text: Option<&str>) -> &str {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => bounded_text(t),
        _ => "non specificato",
    }
}

/// Pretty-printed JSON for embedding structured caller data
pub(crate) fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let rendered = render(
            "Settore: {{sector}} ({{sector}}), ruolo {{role}}",
            &[("sector", "edilizia"), ("role", "geometra")],
        );
        assert_eq!(rendered, "Settore: edilizia (edilizia), ruolo geometra");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{{missing}}", &[]), "{{missing}}");
    }

    #[test]
    fn test_render_does_not_expand_placeholders_inside_values() {
        let rendered = render(
            "Ruolo: {{role}}\nContesto: {{context}}",
            &[("role", "{{context}}{{context}}"), ("context", "ampio contesto")],
        );
        assert_eq!(
            rendered,
            "Ruolo: {{context}}{{context}}\nContesto: ampio contesto"
        );
    }

    #[test]
    fn test_bounded_text_caps_length() {
        let long = "a".repeat(MAX_PROMPT_TEXT_CHARS + 500);
        assert_eq!(bounded_text(&long).chars().count(), MAX_PROMPT_TEXT_CHARS);
        assert_eq!(bounded_text("  breve  "), "breve");
    }

    #[test]
    fn test_optional_text_defaults() {
        assert_eq!(optional_text(None), "non specificato");
        assert_eq!(optional_text(Some("   ")), "non specificato");
        assert_eq!(optional_text(Some(" retail ")), "retail");
    }
}
