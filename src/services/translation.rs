//! Optional query translation
//!
//! Users may type titles in their own language while the corpus is in English. When enabled,
//! queries are translated before resolution; any failure falls back to the raw query.

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{config::Config, error::TranslationError};

/// Trait for query translation backends
#[async_trait::async_trait]
pub trait QueryTranslator: Send + Sync {
    /// Translate `text` into the corpus language
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;

    /// Translator name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Translator backed by the public Google Translate endpoint
#[derive(Clone)]
pub struct GoogleTranslator {
    http_client: HttpClient,
    api_url: String,
    source_lang: String,
    target_lang: String,
}

impl GoogleTranslator {
    pub fn new(
        http_client: HttpClient,
        api_url: String,
        source_lang: String,
        target_lang: String,
    ) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            source_lang,
            target_lang,
        }
    }

    /// Creates a translator when `TRANSLATE_QUERIES` is on
    pub fn from_config(config: &Config, http_client: HttpClient) -> Option<Self> {
        config.translate_queries.then(|| {
            Self::new(
                http_client,
                config.translate_api_url.clone(),
                config.translate_source_lang.clone(),
                config.translate_target_lang.clone(),
            )
        })
    }

    /// Joins the translated segments of a `translate_a/single` response
    ///
    /// The payload is a nested array whose first element lists `[translated, original, ...]`
    /// segments.
    fn parse_response(body: &Value) -> Result<String, TranslationError> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| TranslationError::MalformedResponse(body.to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.trim().is_empty() {
            return Err(TranslationError::MalformedResponse(body.to_string()));
        }

        Ok(translated.trim().to_string())
    }
}

#[async_trait::async_trait]
impl QueryTranslator for GoogleTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let url = format!("{}/translate_a/single", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        let translated = Self::parse_response(&body)?;

        tracing::debug!(
            query = %text,
            translated = %translated,
            translator = "google",
            "Query translated"
        );

        Ok(translated)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// Translates `query` when a translator is configured, falling back to the raw query
pub async fn translate_or_passthrough(
    translator: Option<&dyn QueryTranslator>,
    query: &str,
) -> String {
    let Some(translator) = translator else {
        return query.to_string();
    };

    match translator.translate(query).await {
        Ok(translated) => translated,
        Err(e) => {
            tracing::warn!(
                query = %query,
                translator = translator.name(),
                error = %e,
                "Query translation failed, using original query"
            );
            query.to_string()
        }
    }
}
