use crate::{
    engine::{RecommendationIndex, Recommendations},
    error::{AppError, AppResult},
    models::{EnrichedRecommendation, RecommendationResponse},
    services::{
        enrichment::Enricher,
        translation::{translate_or_passthrough, QueryTranslator},
    },
};

/// Generates content-based recommendations for a title
///
/// The query is optionally translated, resolved against the corpus, ranked by the index and
/// finally decorated with media. When the translated query does not match a title, the raw
/// query is tried as well so titles typed in the corpus language still resolve.
pub async fn get_recommendations(
    index: &RecommendationIndex,
    translator: Option<&dyn QueryTranslator>,
    enricher: &Enricher,
    query: &str,
    k: usize,
    with_media: bool,
) -> AppResult<RecommendationResponse> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    let translated = translate_or_passthrough(translator, query).await;

    let (resolved_query, recommendations) = match index.recommend(&translated, k) {
        Recommendations::NotFound if translated != query => {
            (query.to_string(), index.recommend(query, k))
        }
        found => (translated, found),
    };

    let Recommendations::Found { query_index, items } = recommendations else {
        tracing::info!(query = %query, resolved_query = %resolved_query, "Title not found");
        return Err(AppError::NotFound(format!("No title matches '{}'", query)));
    };

    let matched_title = index
        .corpus()
        .get(query_index)
        .map(|item| item.title.clone())
        .ok_or_else(|| AppError::Internal(format!("Index {} out of range", query_index)))?;

    let recommendations = if with_media {
        enricher.enrich(items).await
    } else {
        items
            .into_iter()
            .map(EnrichedRecommendation::without_media)
            .collect()
    };

    tracing::info!(
        query = %query,
        matched_title = %matched_title,
        results = recommendations.len(),
        "Recommendations generated"
    );

    Ok(RecommendationResponse {
        query: query.to_string(),
        resolved_query,
        matched_title,
        recommendations,
    })
}
