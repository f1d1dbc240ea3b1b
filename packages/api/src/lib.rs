// ABOUTME: HTTP API layer for Pulse: analysis functions and the access gate
// ABOUTME: Routing, CORS and the shared state wiring live here

use axum::{
    http::{header, HeaderName, Method},
    routing::post,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod access_handlers;
pub mod analysis_handlers;
pub mod error;
pub mod kinds;
pub mod mailer;
pub mod state;

pub use error::{AnalysisError, ApiResult};
pub use state::AppState;

use analysis_handlers::{analyze, preflight};
use kinds::{
    DocumentExtraction, HrConsultant, LegacyPredict, Predictions, RealityCheck, TenderAnalysis,
};

/// Creates the functions router (nested under /functions/v1)
pub fn create_functions_router(state: AppState) -> Router {
    Router::new()
        // Analysis endpoints
        .route(
            "/extract-document",
            post(analyze::<DocumentExtraction>).options(preflight),
        )
        .route(
            "/analyze-tenders",
            post(analyze::<TenderAnalysis>).options(preflight),
        )
        .route(
            "/generate-predictions",
            post(analyze::<Predictions>).options(preflight),
        )
        .route(
            "/hr-consultant",
            post(analyze::<HrConsultant>).options(preflight),
        )
        .route(
            "/reality-check",
            post(analyze::<RealityCheck>).options(preflight),
        )
        .route("/predict", post(analyze::<LegacyPredict>).options(preflight))
        // Access gate
        .route(
            "/validate-access-code",
            post(access_handlers::validate_access_code).options(preflight),
        )
        .route(
            "/request-access",
            post(access_handlers::request_access).options(preflight),
        )
        .with_state(state)
}

/// Browser clients call the functions directly from any origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
