pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::{self, MAX_UPLOAD_BYTES};
use crate::auth;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/analyze", post(handlers::handle_analyze))
        // Multipart bodies carry the form fields alongside the file, so leave
        // headroom above the per-file cap enforced in the handler.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(protected)
        .with_state(state)
}
