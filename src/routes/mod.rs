use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    models::IndexSummary,
    state::AppState,
};

pub mod recommendations;
pub mod titles;

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/titles/suggest", get(titles::suggest))
        .route("/recommendations", get(recommendations::recommend))
        .route("/index", get(index_summary))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Size of the loaded index
async fn index_summary(State(state): State<Arc<AppState>>) -> Json<IndexSummary> {
    Json(IndexSummary {
        items: state.index.corpus().len(),
        vocabulary_size: state.index.vocabulary().len(),
        max_features: state.index.max_features(),
    })
}
