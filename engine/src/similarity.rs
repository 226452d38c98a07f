use crate::tfidf::DocVector;
use serde::{Deserialize, Serialize};

/// Dense symmetric N x N matrix of pairwise linear-kernel scores, stored
/// row-major. Memory grows as N^2 and build cost as N^2 * avg-nonzeros;
/// fine for the corpus sizes this system targets (tens to low hundreds of
/// movies) but worth keeping in mind if the corpus grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute the all-pairs dot-product matrix. The upper triangle is
    /// computed and mirrored, so the result is exactly symmetric.
    pub fn from_vectors(vectors: &[DocVector]) -> Self {
        let n = vectors.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in i..n {
                let score = vectors[i].dot(&vectors[j]);
                data[i * n + j] = score;
                data[j * n + i] = score;
            }
        }
        Self { n, data }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    /// True when the backing storage really holds n x n entries. Decoded
    /// snapshots are untrusted, so `n` may not match the data they carry.
    pub(crate) fn storage_consistent(&self) -> bool {
        self.n.checked_mul(self.n).map_or(false, |len| len == self.data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, Movie};
    use crate::tfidf::fit_transform;

    fn matrix_for(descriptions: &[&str]) -> SimilarityMatrix {
        let mut corpus = Corpus::new();
        for (i, d) in descriptions.iter().enumerate() {
            corpus.push(Movie { title: format!("m{i}"), description: d.to_string() });
        }
        let (_, vectors) = fit_transform(&corpus);
        SimilarityMatrix::from_vectors(&vectors)
    }

    #[test]
    fn matrix_is_square_and_symmetric() {
        let m = matrix_for(&[
            "detective hunts a serial killer",
            "a killer evades a detective",
            "romantic comedy in paris",
            "paris heist gone wrong",
        ]);
        assert_eq!(m.len(), 4);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn diagonal_dominates_row_for_nonzero_vectors() {
        let m = matrix_for(&[
            "wizard school adventure",
            "school for young wizards",
            "courtroom drama verdict",
        ]);
        for i in 0..3 {
            for j in 0..3 {
                assert!(m.get(i, i) >= m.get(i, j));
            }
        }
    }

    #[test]
    fn all_empty_descriptions_score_zero() {
        let m = matrix_for(&["", "", ""]);
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m.get(i, j), 0.0);
            }
        }
    }
}
