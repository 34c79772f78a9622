use std::sync::Arc;
use std::time::Duration;

use crate::{
    cache::MediaCache,
    config::Config,
    engine::RecommendationIndex,
    services::{Enricher, GoogleTranslator, QueryTranslator, TmdbProvider},
};

/// Request limits applied by the HTTP handlers
#[derive(Debug, Clone, Copy)]
pub struct ApiSettings {
    pub default_recommendations: usize,
    pub max_recommendations: usize,
    pub suggestion_limit: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            default_recommendations: 5,
            max_recommendations: 50,
            suggestion_limit: 5,
        }
    }
}

impl From<&Config> for ApiSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_recommendations: config.default_recommendations,
            max_recommendations: config.max_recommendations,
            suggestion_limit: config.suggestion_limit,
        }
    }
}

/// Shared application state
///
/// The index is built once before the server starts and is only ever read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<RecommendationIndex>,
    pub enricher: Enricher,
    pub translator: Option<Arc<dyn QueryTranslator>>,
    pub settings: ApiSettings,
}

impl AppState {
    /// State with no external collaborators: title-only results, untranslated queries
    pub fn new(index: RecommendationIndex) -> Self {
        Self {
            index: Arc::new(index),
            enricher: Enricher::disabled(),
            translator: None,
            settings: ApiSettings::default(),
        }
    }

    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn QueryTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_settings(mut self, settings: ApiSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Wires collaborators according to configuration
    pub fn from_config(config: &Config, index: RecommendationIndex) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let mut state = Self::new(index).with_settings(ApiSettings::from(config));

        match TmdbProvider::from_config(config, http_client.clone()) {
            Some(provider) => {
                let cache = MediaCache::new(config.media_cache_ttl_secs);
                state = state.with_enricher(Enricher::new(Arc::new(provider), cache));
                tracing::info!(provider = "tmdb", "Media enrichment enabled");
            }
            None => {
                tracing::warn!("TMDB_API_KEY not set, recommendations will carry no media");
            }
        }

        if let Some(translator) = GoogleTranslator::from_config(config, http_client) {
            tracing::info!(
                source = %config.translate_source_lang,
                target = %config.translate_target_lang,
                "Query translation enabled"
            );
            state = state.with_translator(Arc::new(translator));
        }

        Ok(state)
    }

    pub fn translator(&self) -> Option<&dyn QueryTranslator> {
        self.translator.as_deref()
    }
}
