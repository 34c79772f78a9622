//! Bag-of-words vectorizer
//!
//! Builds a capped vocabulary from the tags of every item and encodes each item as a sparse
//! vector of raw term counts over that vocabulary.

use std::collections::HashMap;

use super::corpus::Corpus;
use super::stopwords::StopWords;

/// Splits text into lower-cased word tokens of at least two characters
///
/// Any character that is neither alphanumeric nor `_` acts as a separator.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().nth(1).is_some())
        .map(str::to_lowercase)
}

/// Token to column mapping, immutable once built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    columns: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn column(&self, token: &str) -> Option<usize> {
        self.columns.get(token).copied()
    }

    /// Term stored at `column`
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    /// Terms in column order (most frequent first)
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Sparse item-by-term count matrix in compressed row form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMatrix {
    /// `row_offsets[i]..row_offsets[i + 1]` spans row `i` in `columns` and `counts`
    row_offsets: Vec<usize>,
    columns: Vec<usize>,
    counts: Vec<u32>,
    n_columns: usize,
}

impl TermMatrix {
    pub fn n_rows(&self) -> usize {
        self.row_offsets.len().saturating_sub(1)
    }

    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Number of stored (nonzero) entries
    pub fn nnz(&self) -> usize {
        self.counts.len()
    }

    /// Column indices (ascending) and counts of row `i`
    pub fn row(&self, i: usize) -> (&[usize], &[u32]) {
        let span = self.row_offsets[i]..self.row_offsets[i + 1];
        (&self.columns[span.clone()], &self.counts[span])
    }

    /// Count at `(row, column)`, zero when absent
    pub fn get(&self, row: usize, column: usize) -> u32 {
        let (columns, counts) = self.row(row);
        columns
            .binary_search(&column)
            .map(|pos| counts[pos])
            .unwrap_or(0)
    }

    /// Squared euclidean norm of row `i`, exact in integer arithmetic
    pub fn norm_sq(&self, i: usize) -> u64 {
        let (_, counts) = self.row(i);
        counts.iter().map(|&c| u64::from(c) * u64::from(c)).sum()
    }
}

/// Count vectorizer with a frequency-capped vocabulary
#[derive(Debug, Clone)]
pub struct Vectorizer {
    max_features: usize,
    stop_words: StopWords,
}

impl Vectorizer {
    pub fn new(max_features: usize, stop_words: StopWords) -> Self {
        Self {
            max_features,
            stop_words,
        }
    }

    /// Builds the vocabulary from `corpus` and encodes every item against it
    pub fn build(&self, corpus: &Corpus) -> (Vocabulary, TermMatrix) {
        let vocabulary = self.fit(corpus);
        let matrix = self.transform(corpus, &vocabulary);

        tracing::debug!(
            items = matrix.n_rows(),
            vocabulary = vocabulary.len(),
            nnz = matrix.nnz(),
            "Term matrix built"
        );

        (vocabulary, matrix)
    }

    fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        tokenize(text).filter(|token| !self.stop_words.contains(token))
    }

    /// Selects the `max_features` most frequent tokens across the corpus
    ///
    /// Ties keep the order in which tokens were first seen, scanning items in corpus order.
    fn fit(&self, corpus: &Corpus) -> Vocabulary {
        // (first_seen, total_count) per token
        let mut frequencies: HashMap<String, (usize, u64)> = HashMap::new();

        for item in corpus.items() {
            for token in self.tokens(&item.tags) {
                let next_rank = frequencies.len();
                frequencies.entry(token).or_insert((next_rank, 0)).1 += 1;
            }
        }

        let mut ranked: Vec<(String, usize, u64)> = frequencies
            .into_iter()
            .map(|(token, (first_seen, count))| (token, first_seen, count))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));
        ranked.truncate(self.max_features);

        let terms: Vec<String> = ranked.into_iter().map(|(token, _, _)| token).collect();
        let columns = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column))
            .collect();

        Vocabulary { columns, terms }
    }

    fn transform(&self, corpus: &Corpus, vocabulary: &Vocabulary) -> TermMatrix {
        let mut row_offsets = Vec::with_capacity(corpus.len() + 1);
        let mut columns = Vec::new();
        let mut counts = Vec::new();
        row_offsets.push(0);

        for item in corpus.items() {
            let mut row: HashMap<usize, u32> = HashMap::new();
            for token in self.tokens(&item.tags) {
                if let Some(column) = vocabulary.column(&token) {
                    *row.entry(column).or_insert(0) += 1;
                }
            }

            let mut row: Vec<(usize, u32)> = row.into_iter().collect();
            row.sort_unstable_by_key(|&(column, _)| column);

            for (column, count) in row {
                columns.push(column);
                counts.push(count);
            }
            row_offsets.push(columns.len());
        }

        TermMatrix {
            row_offsets,
            columns,
            counts,
            n_columns: vocabulary.len(),
        }
    }
}
