use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::SuggestionResponse,
    services::title_search,
    state::AppState,
};

const MAX_SUGGESTIONS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    q: String,
    limit: Option<usize>,
}

/// Handler for title autocomplete endpoint
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> AppResult<Json<SuggestionResponse>> {
    let limit = params.limit.unwrap_or(state.settings.suggestion_limit);
    if limit > MAX_SUGGESTIONS {
        return Err(AppError::InvalidInput(format!(
            "limit must be at most {}",
            MAX_SUGGESTIONS
        )));
    }

    let response = title_search::suggest_titles(&state.index, &params.q, limit)?;
    Ok(Json(response))
}
