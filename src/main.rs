use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reelmatch_api::{
    config::Config,
    engine::{Corpus, RecommendationIndex},
    error::CorpusLoadError,
    routes::create_router,
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelmatch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Vectorizing and the pairwise similarity pass are CPU bound; keep them off the reactor
    let corpus_path = config.corpus_path.clone();
    let options = config.index_options();
    let index = tokio::task::spawn_blocking(move || {
        let corpus = Corpus::from_path(&corpus_path)?;
        Ok::<_, CorpusLoadError>(RecommendationIndex::build(corpus, options))
    })
    .await
    .context("Index build task panicked")?
    .with_context(|| format!("Failed to load corpus from {}", config.corpus_path))?;

    let state = AppState::from_config(&config, index)?;

    if state.enricher.is_enabled() {
        let enricher = state.enricher.clone();
        let period = Duration::from_secs(config.media_cache_ttl_secs.clamp(60, 3600));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                enricher.purge_cache().await;
            }
        });
    }

    let app = create_router(Arc::new(state));

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
