use serde::Deserialize;

use crate::engine::{IndexOptions, StopWords};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV file with at least `title` and `tags` columns
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,

    /// Vocabulary cap for the vectorizer
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Stopword set name: `english` or `none`
    #[serde(default = "default_stop_words")]
    pub stop_words: String,

    /// Neighbors returned when a request does not ask for a specific count
    #[serde(default = "default_recommendations")]
    pub default_recommendations: usize,

    /// Upper bound on neighbors a single request may ask for
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Suggestions returned when a request does not pass `limit`
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// TMDB API key; media enrichment is disabled without it
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    #[serde(default = "default_tmdb_site_url")]
    pub tmdb_site_url: String,

    /// Language requested for TMDB detail pages and trailers
    #[serde(default = "default_metadata_language")]
    pub metadata_language: String,

    /// Translate queries to the corpus language before resolving them
    #[serde(default)]
    pub translate_queries: bool,

    #[serde(default = "default_translate_api_url")]
    pub translate_api_url: String,

    #[serde(default = "default_translate_source_lang")]
    pub translate_source_lang: String,

    #[serde(default = "default_translate_target_lang")]
    pub translate_target_lang: String,

    /// Timeout applied to every outbound HTTP request
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// How long an enrichment lookup stays cached
    #[serde(default = "default_media_cache_ttl_secs")]
    pub media_cache_ttl_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_corpus_path() -> String {
    "data/movies_sample.csv".to_string()
}

fn default_max_features() -> usize {
    5000
}

fn default_stop_words() -> String {
    "english".to_string()
}

fn default_recommendations() -> usize {
    5
}

fn default_max_recommendations() -> usize {
    50
}

fn default_suggestion_limit() -> usize {
    5
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_site_url() -> String {
    "https://www.themoviedb.org".to_string()
}

fn default_metadata_language() -> String {
    "es".to_string()
}

fn default_translate_api_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_translate_source_lang() -> String {
    "es".to_string()
}

fn default_translate_target_lang() -> String {
    "en".to_string()
}

fn default_http_timeout_secs() -> u64 {
    5
}

fn default_media_cache_ttl_secs() -> u64 {
    86400
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            max_features: default_max_features(),
            stop_words: default_stop_words(),
            default_recommendations: default_recommendations(),
            max_recommendations: default_max_recommendations(),
            suggestion_limit: default_suggestion_limit(),
            tmdb_api_key: None,
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_image_url: default_tmdb_image_url(),
            tmdb_site_url: default_tmdb_site_url(),
            metadata_language: default_metadata_language(),
            translate_queries: false,
            translate_api_url: default_translate_api_url(),
            translate_source_lang: default_translate_source_lang(),
            translate_target_lang: default_translate_target_lang(),
            http_timeout_secs: default_http_timeout_secs(),
            media_cache_ttl_secs: default_media_cache_ttl_secs(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the index or the API cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_features == 0 {
            anyhow::bail!("MAX_FEATURES must be greater than zero");
        }
        if StopWords::from_name(&self.stop_words).is_none() {
            anyhow::bail!(
                "Unknown STOP_WORDS '{}', expected 'english' or 'none'",
                self.stop_words
            );
        }
        if self.default_recommendations > self.max_recommendations {
            anyhow::bail!(
                "DEFAULT_RECOMMENDATIONS ({}) exceeds MAX_RECOMMENDATIONS ({})",
                self.default_recommendations,
                self.max_recommendations
            );
        }
        Ok(())
    }

    /// Vectorizer settings derived from this configuration
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            max_features: self.max_features,
            stop_words: StopWords::from_name(&self.stop_words).unwrap_or_default(),
        }
    }

    /// TMDB key with blank values treated as absent
    pub fn tmdb_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
