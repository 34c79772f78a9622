pub mod enrichment;
pub mod providers;
pub mod recommendations;
pub mod title_search;
pub mod translation;

pub use enrichment::Enricher;
pub use providers::{MetadataProvider, TmdbProvider};
pub use translation::{GoogleTranslator, QueryTranslator};
