pub mod generate;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub const KEYWORDS_HEADER: &str = "x-keywords-added";

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/generate", post(generate::generate_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Any origin may call the API; browsers may read the download name and the
/// keyword list.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive().expose_headers([
        header::CONTENT_DISPOSITION,
        HeaderName::from_static(KEYWORDS_HEADER),
    ])
}
