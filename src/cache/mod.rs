pub mod media;

mod macros;

pub use media::CacheKey;
pub use media::MediaCache;
