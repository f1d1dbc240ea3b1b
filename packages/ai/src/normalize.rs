// ABOUTME: Extracts structured JSON from free-text model completions
// ABOUTME: Fenced block, then brace span, then raw text; a fallback object replaces anything unusable

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

lazy_static! {
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"(?s)```(?i:json)?[ \t]*\r?\n?(.*?)```").expect("fenced block regex is valid");
}

/// Where the parsed JSON came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    FencedBlock,
    BracedSpan,
    BalancedObject,
    RawText,
}

/// Why a fallback object was substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    Unparseable,
    RejectedShape,
}

/// Substring selected for parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub source: ExtractionSource,
    pub text: &'a str,
}

/// Outcome of normalizing one completion
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResult {
    pub value: Value,
    pub source: Option<ExtractionSource>,
    pub fallback: Option<FallbackReason>,
}

impl NormalizedResult {
    pub fn used_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Inner content of the first triple-backtick block, optionally tagged `json`
pub fn fenced_block(text: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Greedy span from the first `{` to the last `}`
pub fn braced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// First brace-balanced object, skipping braces inside JSON strings
pub fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Pick the substring to parse: fenced block, then brace span, then the whole text
pub fn select_candidate(text: &str) -> Candidate<'_> {
    if let Some(inner) = fenced_block(text) {
        return Candidate {
            source: ExtractionSource::FencedBlock,
            text: inner,
        };
    }
    if let Some(span) = braced_span(text) {
        return Candidate {
            source: ExtractionSource::BracedSpan,
            text: span,
        };
    }
    Candidate {
        source: ExtractionSource::RawText,
        text: text.trim(),
    }
}

/// Strict JSON parse of the candidate. A greedy brace span that fails gets one
/// more attempt on its first balanced object.
pub fn parse_candidate(candidate: Candidate<'_>) -> Option<(Value, ExtractionSource)> {
    match serde_json::from_str::<Value>(candidate.text) {
        Ok(value) => Some((value, candidate.source)),
        Err(e) => {
            debug!(
                "Completion candidate from {:?} is not valid JSON: {}",
                candidate.source, e
            );
            if candidate.source != ExtractionSource::BracedSpan {
                return None;
            }
            let inner = balanced_object(candidate.text)?;
            serde_json::from_str::<Value>(inner)
                .ok()
                .map(|value| (value, ExtractionSource::BalancedObject))
        }
    }
}

/// Parsed JSON from a completion, if any tier yields valid JSON
pub fn extract_json(text: &str) -> Option<Value> {
    parse_candidate(select_candidate(text)).map(|(value, _)| value)
}

/// Normalize a completion into a structurally valid value.
///
/// `accepts` is the caller's shape check; a value it rejects is treated like
/// unparseable output. This never fails: `fallback` is used instead.
pub fn normalize_completion<F, A>(text: &str, fallback: F, accepts: A) -> NormalizedResult
where
    F: FnOnce() -> Value,
    A: Fn(&Value) -> bool,
{
    match parse_candidate(select_candidate(text)) {
        Some((value, source)) if accepts(&value) => NormalizedResult {
            value,
            source: Some(source),
            fallback: None,
        },
        Some((_, source)) => {
            warn!(
                "Parsed completion from {:?} has an unexpected shape, using fallback",
                source
            );
            NormalizedResult {
                value: fallback(),
                source: Some(source),
                fallback: Some(FallbackReason::RejectedShape),
            }
        }
        None => {
            warn!(
                "Completion is not extractable JSON ({} chars), using fallback",
                text.chars().count()
            );
            NormalizedResult {
                value: fallback(),
                source: None,
                fallback: Some(FallbackReason::Unparseable),
            }
        }
    }
}
