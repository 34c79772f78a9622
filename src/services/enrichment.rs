use std::sync::Arc;

use crate::{
    cache::{CacheKey, MediaCache},
    cached,
    engine::Recommendation,
    error::EnrichmentError,
    models::{EnrichedRecommendation, Media},
    services::providers::MetadataProvider,
};

/// Decorates recommendations with media from an optional provider
///
/// Enrichment is best-effort: a missing provider, an unknown title and a failed lookup all
/// produce `media: None` for the affected entry and never fail the whole list.
#[derive(Clone)]
pub struct Enricher {
    provider: Option<Arc<dyn MetadataProvider>>,
    cache: MediaCache,
}

impl Enricher {
    pub fn new(provider: Arc<dyn MetadataProvider>, cache: MediaCache) -> Self {
        Self {
            provider: Some(provider),
            cache,
        }
    }

    /// Enricher that never looks anything up
    pub fn disabled() -> Self {
        Self {
            provider: None,
            cache: MediaCache::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|provider| provider.name())
    }

    /// Evicts expired cache entries, returning how many were dropped
    pub async fn purge_cache(&self) -> usize {
        self.cache.purge_expired().await
    }

    /// Media for a single title, served from the cache when possible
    pub async fn lookup(&self, title: &str) -> Result<Option<Media>, EnrichmentError> {
        let Some(provider) = self.provider.as_ref() else {
            return Ok(None);
        };

        cached!(
            self.cache,
            CacheKey::Media(title.to_string()),
            provider.lookup(title)
        )
    }

    /// Looks up media for every recommendation concurrently, preserving order
    pub async fn enrich(&self, recommendations: Vec<Recommendation>) -> Vec<EnrichedRecommendation> {
        if !self.is_enabled() {
            return recommendations
                .into_iter()
                .map(EnrichedRecommendation::without_media)
                .collect();
        }

        let mut tasks = Vec::with_capacity(recommendations.len());
        for recommendation in &recommendations {
            let enricher = self.clone();
            let title = recommendation.title.clone();
            tasks.push(tokio::spawn(async move { enricher.lookup(&title).await }));
        }

        let mut enriched = Vec::with_capacity(recommendations.len());
        let mut error_count = 0;

        for (recommendation, task) in recommendations.into_iter().zip(tasks) {
            let media = match task.await {
                Ok(Ok(media)) => media,
                Ok(Err(e)) => {
                    tracing::warn!(
                        title = %recommendation.title,
                        error = %e,
                        "Media enrichment unavailable"
                    );
                    error_count += 1;
                    None
                }
                Err(e) => {
                    let e = EnrichmentError::Task(e.to_string());
                    tracing::error!(title = %recommendation.title, error = %e, "Task join error");
                    error_count += 1;
                    None
                }
            };
            enriched.push(EnrichedRecommendation::new(recommendation, media));
        }

        if error_count > 0 {
            tracing::warn!(
                success_count = enriched.len() - error_count,
                error_count,
                "Partial media enrichment failure"
            );
        }

        enriched
    }
}
