use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::RecommendationResponse,
    services::recommendations,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub k: Option<usize>,
    pub media: Option<bool>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let k = params.k.unwrap_or(state.settings.default_recommendations);
    if k > state.settings.max_recommendations {
        return Err(AppError::InvalidInput(format!(
            "k must be at most {}",
            state.settings.max_recommendations
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        k,
        "Processing recommendation request"
    );

    let response = recommendations::get_recommendations(
        &state.index,
        state.translator(),
        &state.enricher,
        &params.title,
        k,
        params.media.unwrap_or(true),
    )
    .await?;

    Ok(Json(response))
}
