// ABOUTME: Limits applied to analysis request payloads
// ABOUTME: Minimum lengths checked before any gateway call and prompt size bounds

/// Minimum number of characters a document must contain to be worth extracting
pub const MIN_DOCUMENT_CHARS: usize = 50;

/// Free text embedded in a prompt is cut to this many characters
pub const MAX_PROMPT_TEXT_CHARS: usize = 8000;

/// Minimum length of the company description for a reality check
pub const MIN_COMPANY_CONTEXT_CHARS: usize = 20;

/// Minimum length of a job role for HR advice
pub const MIN_ROLE_CHARS: usize = 2;

/// Tenders beyond this count are dropped before prompting
pub const MAX_TENDERS: usize = 25;
