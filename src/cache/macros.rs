/// A macro to look a value up in a cache, computing and storing it on a miss.
///
/// Only successful results are stored, so a failed lookup is retried on the next call.
///
/// # Parameters
/// * `$cache`: A cache exposing `get_from_cache` and `set_in_cache`.
/// * `$key`: The key under which the value is stored.
/// * `$block`: A future producing `Result<V, E>`, awaited only on a miss.
///
/// # Example
/// ```rust,ignore
/// let media = cached!(cache, CacheKey::Media(title.to_string()), async move {
///     provider.lookup(title).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_cache(&$key, value.clone()).await;
            Ok(value)
        }
    }};
}
