//! Title lookup: exact resolution and autocomplete suggestions

use std::collections::HashMap;

use super::corpus::Corpus;

/// Case-insensitive view over the corpus titles
#[derive(Debug, Clone, Default)]
pub struct TitleResolver {
    /// Lower-cased titles in corpus order
    folded: Vec<String>,
    /// Trimmed, lower-cased title to its first occurrence
    exact: HashMap<String, usize>,
}

impl TitleResolver {
    pub fn new(corpus: &Corpus) -> Self {
        let folded: Vec<String> = corpus
            .items()
            .iter()
            .map(|item| item.title.to_lowercase())
            .collect();

        let mut exact = HashMap::with_capacity(folded.len());
        for (index, title) in folded.iter().enumerate() {
            exact.entry(title.trim().to_string()).or_insert(index);
        }

        Self { folded, exact }
    }

    /// Index of the item whose title equals `query` ignoring case
    ///
    /// Surrounding whitespace is ignored on both sides. Duplicate titles resolve to the lowest
    /// index.
    pub fn resolve_exact(&self, query: &str) -> Option<usize> {
        self.exact.get(&query.trim().to_lowercase()).copied()
    }

    /// Indices of up to `limit` items whose title contains `fragment`, in corpus order
    pub fn suggest(&self, fragment: &str, limit: usize) -> Vec<usize> {
        if fragment.trim().is_empty() {
            return Vec::new();
        }
        let needle = fragment.to_lowercase();

        self.folded
            .iter()
            .enumerate()
            .filter(|(_, title)| title.contains(&needle))
            .map(|(index, _)| index)
            .take(limit)
            .collect()
    }
}
