//! Corpus loading
//!
//! The corpus is a CSV table with one row per movie. `title` and `tags` are required; every
//! other column is carried along untouched so the API can echo identifiers such as `movie_id`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::CorpusLoadError;

const TITLE_COLUMN: &str = "title";
const TAGS_COLUMN: &str = "tags";

/// A single recommendable movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Row position in the source, stable for the lifetime of the process
    pub index: usize,
    pub title: String,
    /// Bag of descriptive tokens (genres, cast, keywords) precomputed upstream
    pub tags: String,
    /// Columns other than `title` and `tags`, keyed by header name
    pub extra: BTreeMap<String, String>,
}

/// Ordered, immutable collection of items
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    items: Vec<Item>,
}

impl Corpus {
    /// Loads a corpus from a CSV file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CorpusLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CorpusLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let corpus = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            items = corpus.len(),
            "Corpus loaded"
        );

        Ok(corpus)
    }

    /// Loads a corpus from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CorpusLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let title_pos = column_position(&headers, TITLE_COLUMN)?;
        let tags_pos = column_position(&headers, TAGS_COLUMN)?;

        let mut items = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;

            let extra = headers
                .iter()
                .enumerate()
                .filter(|(pos, _)| *pos != title_pos && *pos != tags_pos)
                .map(|(pos, name)| {
                    (
                        name.to_string(),
                        record.get(pos).unwrap_or_default().to_string(),
                    )
                })
                .collect();

            items.push(Item {
                index,
                title: record.get(title_pos).unwrap_or_default().to_string(),
                tags: record.get(tags_pos).unwrap_or_default().to_string(),
                extra,
            });
        }

        if items.is_empty() {
            return Err(CorpusLoadError::Empty);
        }

        Ok(Self { items })
    }

    /// Builds a corpus from `(title, tags)` pairs, mostly useful for tests and fixtures
    pub fn from_pairs<I, T, G>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, G)>,
        T: Into<String>,
        G: Into<String>,
    {
        let items = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (title, tags))| Item {
                index,
                title: title.into(),
                tags: tags.into(),
                extra: BTreeMap::new(),
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn column_position(headers: &csv::StringRecord, name: &str) -> Result<usize, CorpusLoadError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| CorpusLoadError::MissingColumn {
            column: name.to_string(),
            available: headers.iter().map(str::to_string).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_assigns_row_positions() {
        let data = "movie_id,title,tags\n\
                    19995,Avatar,action adventure fantasy\n\
                    285,Pirates of the Caribbean,adventure fantasy pirate\n";

        let corpus = Corpus::from_reader(data.as_bytes()).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.items()[0].index, 0);
        assert_eq!(corpus.items()[1].index, 1);
        assert_eq!(corpus.items()[1].title, "Pirates of the Caribbean");
        assert_eq!(corpus.items()[0].extra.get("movie_id").unwrap(), "19995");
    }

    #[test]
    fn test_load_keeps_duplicate_titles() {
        let data = "title,tags\nAlpha,one two\nalpha,three four\n";

        let corpus = Corpus::from_reader(data.as_bytes()).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.items()[0].title, "Alpha");
        assert_eq!(corpus.items()[1].title, "alpha");
    }

    #[test]
    fn test_load_missing_tags_column() {
        let data = "movie_id,title\n1,Avatar\n";

        let result = Corpus::from_reader(data.as_bytes());

        match result {
            Err(CorpusLoadError::MissingColumn { column, available }) => {
                assert_eq!(column, "tags");
                assert_eq!(available, vec!["movie_id", "title"]);
            }
            other => panic!("expected missing column error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_title_column() {
        let data = "movie_id,tags\n1,space\n";

        let result = Corpus::from_reader(data.as_bytes());

        match result {
            Err(CorpusLoadError::MissingColumn { column, available }) => {
                assert_eq!(column, "title");
                assert_eq!(available, vec!["movie_id", "tags"]);
            }
            other => panic!("expected missing column error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_record() {
        let data = "title,tags\nAvatar,action,extra\n";

        let result = Corpus::from_reader(data.as_bytes());

        assert!(matches!(result, Err(CorpusLoadError::Csv(_))));
    }

    #[test]
    fn test_load_empty_corpus() {
        let data = "title,tags\n";

        let result = Corpus::from_reader(data.as_bytes());

        assert!(matches!(result, Err(CorpusLoadError::Empty)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Corpus::from_path("does/not/exist.csv");

        assert!(matches!(result, Err(CorpusLoadError::Io { .. })));
    }

    #[test]
    fn test_from_pairs() {
        let corpus = Corpus::from_pairs([("Alpha", "space war"), ("Beta", "space")]);

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(1).unwrap().title, "Beta");
        assert!(corpus.get(2).is_none());
    }
}
