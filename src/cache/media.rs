use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::models::Media;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Media(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Media(title) => write!(f, "media:{}", title.trim().to_lowercase()),
        }
    }
}

struct CacheEntry {
    media: Option<Media>,
    cached_at: DateTime<Utc>,
}

/// In-process cache of enrichment lookups
///
/// Stores "no media" answers as well so titles unknown to the provider are not looked up
/// again until the entry expires. Nothing is persisted across restarts.
#[derive(Clone)]
pub struct MediaCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl MediaCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(
                i64::try_from(ttl_secs)
                    .unwrap_or(i64::MAX)
                    .min(i64::MAX / 1000),
            ),
        }
    }

    /// Returns the cached answer, `None` on a miss or an expired entry
    pub async fn get_from_cache(&self, key: &CacheKey) -> Option<Option<Media>> {
        let entries = self.entries.read().await;
        entries
            .get(&key.to_string())
            .filter(|entry| Utc::now() - entry.cached_at < self.ttl)
            .map(|entry| entry.media.clone())
    }

    pub async fn set_in_cache(&self, key: &CacheKey, media: Option<Media>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                media,
                cached_at: Utc::now(),
            },
        );
    }

    /// Drops expired entries, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now - entry.cached_at < self.ttl);
        let removed = before - entries.len();

        if removed > 0 {
            tracing::debug!(removed, remaining = entries.len(), "Purged expired media entries");
        }

        removed
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
