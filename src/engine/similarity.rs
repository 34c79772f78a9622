//! Pairwise cosine similarity over the term matrix

use super::vectorizer::TermMatrix;

/// Dense, symmetric item-by-item cosine similarity
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes `dot(i, j) / (|i| * |j|)` for every pair of rows
    ///
    /// Pairs involving an all-zero row score 0. Only the upper triangle is computed; the lower
    /// triangle is a mirror of it, so `get(i, j) == get(j, i)` holds bit for bit. Dot products
    /// go through an inverted column index and are exact integers, which keeps the output equal
    /// to the naive definition up to the final division.
    pub fn compute(matrix: &TermMatrix) -> Self {
        let size = matrix.n_rows();
        let mut values = vec![0.0_f64; size * size];

        let postings = column_postings(matrix);
        let norms: Vec<f64> = (0..size).map(|i| (matrix.norm_sq(i) as f64).sqrt()).collect();

        let mut dots = vec![0_u64; size];
        let mut touched: Vec<usize> = Vec::new();

        for i in 0..size {
            if norms[i] == 0.0 {
                continue;
            }
            values[i * size + i] = 1.0;

            let (columns, counts) = matrix.row(i);
            for (&column, &count) in columns.iter().zip(counts) {
                let posting = &postings[column];
                // postings are sorted by row, skip everything at or below the diagonal
                let start = posting.partition_point(|&(row, _)| row <= i);
                for &(j, other) in &posting[start..] {
                    if dots[j] == 0 {
                        touched.push(j);
                    }
                    dots[j] += u64::from(count) * u64::from(other);
                }
            }

            for j in touched.drain(..) {
                let score = (dots[j] as f64 / (norms[i] * norms[j])).min(1.0);
                values[i * size + j] = score;
                values[j * size + i] = score;
                dots[j] = 0;
            }
        }

        tracing::debug!(items = size, "Similarity matrix computed");

        Self { size, values }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// Scores of item `i` against every item, in index order
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }
}

/// For each column, the `(row, count)` pairs holding it, ordered by row
fn column_postings(matrix: &TermMatrix) -> Vec<Vec<(usize, u32)>> {
    let mut postings = vec![Vec::new(); matrix.n_columns()];
    for row in 0..matrix.n_rows() {
        let (columns, counts) = matrix.row(row);
        for (&column, &count) in columns.iter().zip(counts) {
            postings[column].push((row, count));
        }
    }
    postings
}
