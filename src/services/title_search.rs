use crate::{
    engine::RecommendationIndex,
    error::{AppError, AppResult},
    models::SuggestionResponse,
};

/// Service function for title autocomplete
///
/// Returns titles containing the fragment in corpus order, keeping HTTP routing free of
/// matching logic.
pub fn suggest_titles(
    index: &RecommendationIndex,
    fragment: &str,
    limit: usize,
) -> AppResult<SuggestionResponse> {
    if fragment.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let suggestions = index.suggest(fragment, limit);

    tracing::debug!(
        query = %fragment,
        results = suggestions.len(),
        "Title suggestions computed"
    );

    Ok(SuggestionResponse {
        query: fragment.to_string(),
        suggestions,
    })
}
