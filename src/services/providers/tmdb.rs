//! The Movie Database (TMDB) provider
//!
//! API Flow:
//! 1. Search: /search/movie?query={title} → first match gives the TMDB ID and poster path
//! 2. Videos: /movie/{id}/videos → first video key becomes a YouTube trailer link
//!
//! A failed video lookup still returns the poster and detail page.

use crate::{
    config::Config,
    error::EnrichmentError,
    models::{Media, TmdbMovie, TmdbSearchResponse, TmdbVideosResponse},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
    site_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(
        http_client: HttpClient,
        api_key: String,
        api_url: String,
        image_url: String,
        site_url: String,
        language: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
            site_url: site_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    /// Creates a provider when a TMDB key is configured
    pub fn from_config(config: &Config, http_client: HttpClient) -> Option<Self> {
        config.tmdb_key().map(|key| {
            Self::new(
                http_client,
                key.to_string(),
                config.tmdb_api_url.clone(),
                config.tmdb_image_url.clone(),
                config.tmdb_site_url.clone(),
                config.metadata_language.clone(),
            )
        })
    }

    /// First search hit for `title`, if any
    async fn search_movie(&self, title: &str) -> Result<Option<TmdbMovie>, EnrichmentError> {
        let url = format!("{}/search/movie", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let search: TmdbSearchResponse = response.json().await?;
        Ok(search.results.into_iter().next())
    }

    /// Key of the first video attached to a movie
    async fn fetch_trailer_key(&self, movie_id: u64) -> Result<Option<String>, EnrichmentError> {
        let url = format!("{}/movie/{}/videos", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let videos: TmdbVideosResponse = response.json().await?;
        Ok(videos.results.into_iter().next().and_then(|video| video.key))
    }

    fn build_media(&self, movie: &TmdbMovie, trailer_key: Option<String>) -> Media {
        Media {
            poster_url: movie
                .poster_path
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(|path| format!("{}{}", self.image_url, path)),
            detail_url: format!(
                "{}/movie/{}?language={}",
                self.site_url, movie.id, self.language
            ),
            trailer_url: trailer_key.map(|key| format!("{}?v={}", YOUTUBE_WATCH_URL, key)),
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn lookup(&self, title: &str) -> Result<Option<Media>, EnrichmentError> {
        let Some(movie) = self.search_movie(title).await? else {
            tracing::debug!(title = %title, provider = "tmdb", "No TMDB match");
            return Ok(None);
        };

        let trailer_key = match self.fetch_trailer_key(movie.id).await {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    movie_id = movie.id,
                    error = %e,
                    "Trailer lookup failed, keeping poster and detail page"
                );
                None
            }
        };

        let media = self.build_media(&movie, trailer_key);

        tracing::debug!(
            title = %title,
            movie_id = movie.id,
            has_poster = media.poster_url.is_some(),
            has_trailer = media.trailer_url.is_some(),
            provider = "tmdb",
            "Media lookup completed"
        );

        Ok(Some(media))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn create_test_provider(api_url: &str) -> TmdbProvider {
        TmdbProvider::new(
            reqwest::Client::new(),
            "test_key".to_string(),
            api_url.to_string(),
            "https://image.tmdb.org/t/p/w500/".to_string(),
            "https://www.themoviedb.org".to_string(),
            "es".to_string(),
        )
    }

    async fn search(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
        if params.get("api_key").map(String::as_str) != Some("test_key") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "status_code": 7 })));
        }
        let results = match params.get("query").map(String::as_str) {
            Some("Avatar") => json!([{ "id": 19995, "poster_path": "/avatar.jpg" }]),
            Some("No Trailer") => json!([{ "id": 404, "poster_path": null }]),
            Some("Broken Videos") => json!([{ "id": 500, "poster_path": "/broken.jpg" }]),
            _ => json!([]),
        };
        (StatusCode::OK, Json(json!({ "page": 1, "results": results })))
    }

    async fn videos(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
        match id {
            19995 => (
                StatusCode::OK,
                Json(json!({ "id": id, "results": [{ "key": "5PSNL1qE6VY" }, { "key": "other" }] })),
            ),
            404 => (StatusCode::OK, Json(json!({ "id": id, "results": [] }))),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
        }
    }

    /// Serves a fake TMDB API on an ephemeral port
    async fn spawn_fake_tmdb() -> String {
        let app = Router::new()
            .route("/search/movie", get(search))
            .route("/movie/:id/videos", get(videos));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_build_media_with_poster_and_trailer() {
        let provider = create_test_provider("http://test.local");
        let movie = TmdbMovie {
            id: 19995,
            poster_path: Some("/avatar.jpg".to_string()),
        };

        let media = provider.build_media(&movie, Some("abc123".to_string()));

        assert_eq!(
            media.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/avatar.jpg")
        );
        assert_eq!(
            media.detail_url,
            "https://www.themoviedb.org/movie/19995?language=es"
        );
        assert_eq!(
            media.trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[test]
    fn test_build_media_without_poster() {
        let provider = create_test_provider("http://test.local");
        let movie = TmdbMovie {
            id: 1,
            poster_path: None,
        };

        let media = provider.build_media(&movie, None);

        assert!(media.poster_url.is_none());
        assert!(media.trailer_url.is_none());
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = Config::default();
        assert!(TmdbProvider::from_config(&config, reqwest::Client::new()).is_none());

        let config = Config {
            tmdb_api_key: Some("secret".to_string()),
            ..Config::default()
        };
        let provider = TmdbProvider::from_config(&config, reqwest::Client::new()).unwrap();
        assert_eq!(provider.api_key, "secret");
        assert_eq!(provider.name(), "tmdb");
    }

    #[tokio::test]
    async fn test_lookup_full_media() {
        let provider = create_test_provider(&spawn_fake_tmdb().await);

        let media = provider.lookup("Avatar").await.unwrap().unwrap();

        assert_eq!(
            media.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/avatar.jpg")
        );
        assert_eq!(
            media.trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=5PSNL1qE6VY")
        );
    }

    #[tokio::test]
    async fn test_lookup_unknown_title() {
        let provider = create_test_provider(&spawn_fake_tmdb().await);

        let media = provider.lookup("Nothing Like It").await.unwrap();

        assert!(media.is_none());
    }

    #[tokio::test]
    async fn test_lookup_without_videos() {
        let provider = create_test_provider(&spawn_fake_tmdb().await);

        let media = provider.lookup("No Trailer").await.unwrap().unwrap();

        assert!(media.poster_url.is_none());
        assert!(media.trailer_url.is_none());
        assert!(media.detail_url.ends_with("/movie/404?language=es"));
    }

    #[tokio::test]
    async fn test_lookup_survives_video_failure() {
        let provider = create_test_provider(&spawn_fake_tmdb().await);

        let media = provider.lookup("Broken Videos").await.unwrap().unwrap();

        assert!(media.poster_url.is_some());
        assert!(media.trailer_url.is_none());
    }

    #[tokio::test]
    async fn test_lookup_reports_upstream_status() {
        let mut provider = create_test_provider(&spawn_fake_tmdb().await);
        provider.api_key = "wrong".to_string();

        let result = provider.lookup("Avatar").await;

        assert!(matches!(
            result,
            Err(EnrichmentError::Status { status: 401, .. })
        ));
    }
}
