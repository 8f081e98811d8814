use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    approve_tender_handler, get_review_logs_handler, get_tender_handler, health_handler,
    list_tenders_handler, reject_tender_handler, update_items_handler, upload_tender_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/tenders",
            post(upload_tender_handler).get(list_tenders_handler),
        )
        .route("/api/v1/tenders/{tender_id}", get(get_tender_handler))
        .route(
            "/api/v1/tenders/{tender_id}/logs",
            get(get_review_logs_handler),
        )
        .route(
            "/api/v1/tenders/{tender_id}/approve",
            post(approve_tender_handler),
        )
        .route(
            "/api/v1/tenders/{tender_id}/reject",
            post(reject_tender_handler),
        )
        .route(
            "/api/v1/tenders/{tender_id}/items",
            put(update_items_handler),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
