//! Router construction.

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Every path is dynamic, so a single fallback handler serves all of them
/// and applies the method check itself.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handlers::docs::get_docs)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
