// ABOUTME: Core types and validation for Pulse analysis requests
// ABOUTME: Foundational package shared by the prompt builder and the HTTP handlers

pub mod constants;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{
    CompanySnapshot, DocumentExtractionRequest, HrConsultantRequest, LegacyPredictRequest,
    PredictionRequest, ProfileType, RealityCheckRequest, TenderAnalysisRequest,
};

// Re-export constants
pub use constants::{
    MAX_PROMPT_TEXT_CHARS, MAX_TENDERS, MIN_COMPANY_CONTEXT_CHARS, MIN_DOCUMENT_CHARS,
    MIN_ROLE_CHARS,
};

// Re-export validation
pub use validation::{truncate, ValidationError, ValidationResult};
