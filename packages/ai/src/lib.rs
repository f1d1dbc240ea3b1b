// ABOUTME: Model gateway integration for Pulse
// ABOUTME: Chat completion client and best-effort JSON normalization of completions

pub mod gateway;
pub mod normalize;

// Re-export gateway types
pub use gateway::{
    ChatCompletion, ChatGateway, ChatMessage, ChatRequest, GatewayClient, GatewayConfig,
    GatewayError, GatewayResult, Role, SamplingParams, Usage,
};

// Re-export normalization pipeline
pub use normalize::{
    extract_json, normalize_completion, select_candidate, ExtractionSource, FallbackReason,
    NormalizedResult,
};
