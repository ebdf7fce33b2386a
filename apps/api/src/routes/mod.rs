pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::assist::handlers as assist;
use crate::catalog::handlers as catalog;
use crate::export::handlers as export;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Template catalog
        .route("/api/v1/templates", get(catalog::handle_list_templates))
        .route("/api/v1/templates/:id", get(catalog::handle_get_template))
        // Sessions and the resume draft
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id/editor/:template_id",
            get(session::handle_open_editor),
        )
        .route(
            "/api/v1/sessions/:id/purchases/:template_id",
            post(session::handle_purchase),
        )
        .route(
            "/api/v1/sessions/:id/document",
            get(session::handle_get_document).patch(session::handle_edit_document),
        )
        .route("/api/v1/sessions/:id/preview", get(session::handle_preview))
        // AI assistance
        .route(
            "/api/v1/sessions/:id/summary",
            post(assist::handle_generate_summary),
        )
        .route("/api/v1/sessions/:id/import", post(assist::handle_import))
        .route("/api/v1/suggestions", post(assist::handle_suggest))
        // Export
        .route(
            "/api/v1/sessions/:id/export/:format",
            post(export::handle_export),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Request tracing and CORS, outermost last.
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // TODO: restrict origins once the web client has a fixed host
}
