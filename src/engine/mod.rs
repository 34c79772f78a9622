//! Content-similarity recommendation engine
//!
//! Leaf-first: the corpus is loaded, vectorized into raw term counts, turned into a pairwise
//! cosine similarity matrix, and wrapped in a [`RecommendationIndex`] that answers
//! `recommend` and `suggest` queries. Nothing here performs I/O beyond reading the corpus.

pub mod corpus;
pub mod index;
pub mod resolver;
pub mod similarity;
pub mod stopwords;
pub mod vectorizer;

pub use corpus::{Corpus, Item};
pub use index::{IndexOptions, Recommendation, RecommendationIndex, Recommendations};
pub use stopwords::StopWords;
