use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use pulse_api::{cors_layer, create_functions_router, AppState};

use crate::middleware::create_panic_handler;

pub mod health;

/// Mount point of every function endpoint
pub const FUNCTIONS_PREFIX: &str = "/functions/v1";

pub fn create_router(state: AppState) -> Router {
    let functions = Router::new()
        .route("/health", get(health::health_check))
        .merge(create_functions_router(state));

    Router::new()
        .nest(FUNCTIONS_PREFIX, functions)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(create_panic_handler())
}
