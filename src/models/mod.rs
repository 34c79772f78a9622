use serde::{Deserialize, Serialize};

use crate::engine::Recommendation;

/// Media links for a title, as found by the metadata provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Media {
    pub poster_url: Option<String>,
    pub detail_url: String,
    pub trailer_url: Option<String>,
}

/// A recommendation decorated with optional media
///
/// `media` is `None` when no provider is configured, the provider found nothing, or the
/// lookup failed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnrichedRecommendation {
    pub index: usize,
    pub title: String,
    pub media: Option<Media>,
}

impl EnrichedRecommendation {
    pub fn new(recommendation: Recommendation, media: Option<Media>) -> Self {
        Self {
            index: recommendation.index,
            title: recommendation.title,
            media,
        }
    }

    pub fn without_media(recommendation: Recommendation) -> Self {
        Self::new(recommendation, None)
    }
}

/// Response for a recommendation query
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// Query exactly as received
    pub query: String,
    /// Query after optional translation, the string that was resolved
    pub resolved_query: String,
    /// Title of the corpus item the query resolved to
    pub matched_title: String,
    pub recommendations: Vec<EnrichedRecommendation>,
}

/// Response for an autocomplete query
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub query: String,
    pub suggestions: Vec<String>,
}

/// Summary of the loaded index
#[derive(Debug, Serialize)]
pub struct IndexSummary {
    pub items: usize,
    pub vocabulary_size: usize,
    pub max_features: usize,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw response from TMDB `/search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Raw response from TMDB `/movie/{id}/videos`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideosResponse {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    #[serde(default)]
    pub key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enriched_recommendation_serialization() {
        let enriched = EnrichedRecommendation::without_media(Recommendation {
            index: 3,
            title: "Alien".to_string(),
        });

        let value = serde_json::to_value(&enriched).unwrap();

        assert_eq!(value["index"], 3);
        assert_eq!(value["title"], "Alien");
        assert!(value["media"].is_null());
    }

    #[test]
    fn test_tmdb_search_response_tolerates_missing_fields() {
        let json = r#"{"page": 1, "results": [{"id": 19995, "title": "Avatar"}]}"#;

        let response: TmdbSearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, 19995);
        assert!(response.results[0].poster_path.is_none());
    }

    #[test]
    fn test_tmdb_videos_response_empty() {
        let response: TmdbVideosResponse = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
