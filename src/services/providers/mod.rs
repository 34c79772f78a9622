//! Metadata provider abstraction
//!
//! Providers decorate recommendations with media (poster, detail page, trailer). They sit
//! outside the recommendation engine: the engine never calls them, and any failure here only
//! costs the affected titles their media.

use crate::{error::EnrichmentError, models::Media};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for media metadata providers
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up media for a title
    ///
    /// `Ok(None)` means the provider does not know the title. Errors cover transport and
    /// upstream failures only.
    async fn lookup(&self, title: &str) -> Result<Option<Media>, EnrichmentError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
