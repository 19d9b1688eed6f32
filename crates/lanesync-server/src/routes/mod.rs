pub mod documents;
pub mod health;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use lanesync_service::LocalService;
use tower_http::cors::CorsLayer;

pub struct InnerAppState {
    pub service: LocalService,
}

pub type AppState = Arc<InnerAppState>;

/// Uploads are bounded by what a file picker can select; axum's 2 MB default
/// is too small for scanned PODs.
const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

pub fn build_router(service: LocalService) -> Router {
    let state: AppState = Arc::new(InnerAppState { service });

    Router::new()
        .merge(health::routes())
        .merge(documents::routes())
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        // The dashboard is a browser app served from another origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
