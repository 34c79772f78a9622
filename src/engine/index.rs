//! The recommendation index
//!
//! Built exactly once after the corpus is loaded, then shared read-only (typically behind an
//! `Arc`) for the rest of the process. Nothing in here mutates after [`RecommendationIndex::build`]
//! returns, so `recommend` and `suggest` can be called from any number of tasks at once.

use std::cmp::Ordering;

use serde::Serialize;

use super::corpus::{Corpus, Item};
use super::resolver::TitleResolver;
use super::similarity::SimilarityMatrix;
use super::stopwords::StopWords;
use super::vectorizer::{TermMatrix, Vectorizer, Vocabulary};

pub const DEFAULT_MAX_FEATURES: usize = 5000;
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

/// Parameters for building an index
#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub max_features: usize,
    pub stop_words: StopWords,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            stop_words: StopWords::english(),
        }
    }
}

/// A neighbor of the queried title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub index: usize,
    pub title: String,
}

/// Outcome of a recommendation query
///
/// `NotFound` means the query matched no title, which is distinct from a match that has no
/// neighbors (`Found` with an empty list, possible only in a single-item corpus).
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    NotFound,
    Found {
        /// Item the query resolved to
        query_index: usize,
        items: Vec<Recommendation>,
    },
}

impl Recommendations {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Recommendations::NotFound)
    }

    /// Recommended titles, empty for `NotFound`
    pub fn titles(&self) -> Vec<&str> {
        match self {
            Recommendations::NotFound => Vec::new(),
            Recommendations::Found { items, .. } => {
                items.iter().map(|r| r.title.as_str()).collect()
            }
        }
    }
}

/// Immutable corpus plus every structure derived from it
#[derive(Debug, Clone)]
pub struct RecommendationIndex {
    corpus: Corpus,
    vocabulary: Vocabulary,
    term_matrix: TermMatrix,
    similarity: SimilarityMatrix,
    resolver: TitleResolver,
    max_features: usize,
}

impl RecommendationIndex {
    /// Vectorizes the corpus and precomputes all pairwise similarities
    pub fn build(corpus: Corpus, options: IndexOptions) -> Self {
        let started = std::time::Instant::now();

        let vectorizer = Vectorizer::new(options.max_features, options.stop_words);
        let (vocabulary, term_matrix) = vectorizer.build(&corpus);
        let similarity = SimilarityMatrix::compute(&term_matrix);
        let resolver = TitleResolver::new(&corpus);

        tracing::info!(
            items = corpus.len(),
            vocabulary = vocabulary.len(),
            nnz = term_matrix.nnz(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recommendation index built"
        );

        Self {
            corpus,
            vocabulary,
            term_matrix,
            similarity,
            resolver,
            max_features: options.max_features,
        }
    }

    /// Up to `k` titles most similar to `query`
    ///
    /// Neighbors are ordered by descending similarity, ties by ascending index. The queried
    /// item itself is never part of the result.
    pub fn recommend(&self, query: &str, k: usize) -> Recommendations {
        let Some(query_index) = self.resolver.resolve_exact(query) else {
            return Recommendations::NotFound;
        };

        let mut scored: Vec<(usize, f64)> = self
            .similarity
            .row(query_index)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(index, _)| index != query_index)
            .collect();

        scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });

        let items = scored
            .into_iter()
            .take(k)
            .map(|(index, _)| Recommendation {
                index,
                title: self.corpus.items()[index].title.clone(),
            })
            .collect();

        Recommendations::Found { query_index, items }
    }

    /// Titles containing `fragment` (ignoring case), at most `limit`, in corpus order
    pub fn suggest(&self, fragment: &str, limit: usize) -> Vec<String> {
        self.resolver
            .suggest(fragment, limit)
            .into_iter()
            .map(|index| self.corpus.items()[index].title.clone())
            .collect()
    }

    pub fn resolve(&self, query: &str) -> Option<&Item> {
        self.resolver
            .resolve_exact(query)
            .and_then(|index| self.corpus.get(index))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn term_matrix(&self) -> &TermMatrix {
        &self.term_matrix
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stop_words() -> IndexOptions {
        IndexOptions {
            max_features: 5000,
            stop_words: StopWords::none(),
        }
    }

    fn alpha_beta_gamma() -> RecommendationIndex {
        let corpus = Corpus::from_pairs([
            ("Alpha", "space war hero"),
            ("Beta", "space hero"),
            ("Gamma", "romance drama"),
        ]);
        RecommendationIndex::build(corpus, no_stop_words())
    }

    fn movies() -> RecommendationIndex {
        let corpus = Corpus::from_pairs([
            ("Avatar", "action adventure fantasy sciencefiction cultureclash future space war"),
            ("Aliens", "action horror sciencefiction space marine alien"),
            ("Titanic", "drama romance ship iceberg love"),
            ("The Notebook", "drama romance love letters"),
            ("Interstellar", "adventure drama sciencefiction space wormhole"),
            ("Gravity", "sciencefiction thriller space astronaut"),
            ("Alien", "horror sciencefiction space alien"),
            ("avatar", "animation fantasy elements"),
        ]);
        RecommendationIndex::build(corpus, IndexOptions::default())
    }

    #[test]
    fn test_recommend_alpha() {
        let index = alpha_beta_gamma();

        let result = index.recommend("Alpha", 2);

        assert_eq!(result.titles(), vec!["Beta", "Gamma"]);
        match result {
            Recommendations::Found { query_index, items } => {
                assert_eq!(query_index, 0);
                assert_eq!(items[0].index, 1);
                assert_eq!(items[1].index, 2);
            }
            Recommendations::NotFound => panic!("Alpha should resolve"),
        }
    }

    #[test]
    fn test_recommend_unknown_title_is_not_found() {
        let index = alpha_beta_gamma();

        let result = index.recommend("Delta", 5);

        assert!(result.is_not_found());
        assert_eq!(result, Recommendations::NotFound);
    }

    #[test]
    fn test_recommend_never_includes_query() {
        let index = movies();

        for item in index.corpus().items() {
            if let Recommendations::Found { query_index, items } =
                index.recommend(&item.title, 10)
            {
                assert!(items.iter().all(|r| r.index != query_index));
            }
        }
    }

    #[test]
    fn test_recommend_respects_k() {
        let index = movies();

        assert_eq!(index.recommend("Aliens", 3).titles().len(), 3);
        assert_eq!(index.recommend("Aliens", 0).titles().len(), 0);
        // only seven other items exist
        assert_eq!(index.recommend("Aliens", 50).titles().len(), 7);
    }

    #[test]
    fn test_recommend_ranks_by_similarity() {
        let index = movies();

        let titles = index.recommend("Aliens", 2).titles().join(",");

        assert_eq!(titles, "Alien,Avatar");
    }

    #[test]
    fn test_recommend_orders_nearly_equal_scores() {
        let lighter = format!("{}yy", "xx ".repeat(1000));
        let heavier = format!("{}yy", "xx ".repeat(1001));
        let corpus = Corpus::from_pairs([
            ("Q", "xx".to_string()),
            ("A", lighter),
            ("B", heavier),
        ]);
        let index = RecommendationIndex::build(corpus, no_stop_words());

        assert_eq!(index.recommend("Q", 2).titles(), vec!["B", "A"]);
    }

    #[test]
    fn test_padded_csv_title_resolves() {
        let data = "title,tags\nAvatar ,space war\nAliens,space\n";
        let corpus = Corpus::from_reader(data.as_bytes()).unwrap();
        let index = RecommendationIndex::build(corpus, no_stop_words());

        assert_eq!(index.suggest("avatar", 5), vec!["Avatar "]);
        match index.recommend("Avatar ", 5) {
            Recommendations::Found { query_index, items } => {
                assert_eq!(query_index, 0);
                assert_eq!(items[0].title, "Aliens");
            }
            Recommendations::NotFound => panic!("padded title should resolve"),
        }
        assert!(!index.recommend("avatar", 5).is_not_found());
    }

    #[test]
    fn test_recommend_ties_break_by_index() {
        let corpus = Corpus::from_pairs([
            ("Query", "heist"),
            ("First", "drama"),
            ("Second", "heist"),
            ("Third", "romance"),
            ("Fourth", "heist"),
        ]);
        let index = RecommendationIndex::build(corpus, no_stop_words());

        let titles = index.recommend("query", 4).titles().join(",");

        assert_eq!(titles, "Second,Fourth,First,Third");
    }

    #[test]
    fn test_recommend_duplicate_title_uses_first_occurrence() {
        let index = movies();

        let result = index.recommend("AVATAR", 7);

        match result {
            Recommendations::Found { query_index, items } => {
                assert_eq!(query_index, 0);
                assert!(items.iter().any(|r| r.index == 7));
            }
            Recommendations::NotFound => panic!("Avatar should resolve"),
        }
    }

    #[test]
    fn test_recommend_single_item_corpus() {
        let corpus = Corpus::from_pairs([("Solo", "space smuggler")]);
        let index = RecommendationIndex::build(corpus, no_stop_words());

        let result = index.recommend("solo", 5);

        assert_eq!(
            result,
            Recommendations::Found {
                query_index: 0,
                items: vec![]
            }
        );
    }

    #[test]
    fn test_recommend_zero_vector_query() {
        let corpus = Corpus::from_pairs([("Blank", ""), ("A", "space"), ("B", "war")]);
        let index = RecommendationIndex::build(corpus, no_stop_words());

        let titles = index.recommend("Blank", 5).titles().join(",");

        assert_eq!(titles, "A,B");
    }

    #[test]
    fn test_suggest_returns_titles() {
        let index = movies();

        assert_eq!(index.suggest("ALIEN", 5), vec!["Aliens", "Alien"]);
        assert_eq!(index.suggest("a", 2), vec!["Avatar", "Aliens"]);
        assert!(index.suggest("zzz", 5).is_empty());
    }

    #[test]
    fn test_index_dimensions() {
        let index = alpha_beta_gamma();

        assert_eq!(index.term_matrix().n_rows(), index.corpus().len());
        assert_eq!(index.term_matrix().n_columns(), index.vocabulary().len());
        assert_eq!(index.similarity().size(), 3);
        assert_eq!(index.resolve("beta").map(|item| item.index), Some(1));
    }
}
