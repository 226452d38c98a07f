use crate::corpus::Corpus;
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermId = u32;

/// Term -> dimension index, built once from the corpus at fit time and
/// immutable afterward.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: HashMap<String, TermId>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.terms.get(term).copied()
    }
}

/// Sparse TF-IDF vector: (term id, weight) pairs sorted by term id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocVector(pub Vec<(TermId, f64)>);

impl DocVector {
    pub fn nnz(&self) -> usize {
        self.0.len()
    }

    /// Dot product of two sorted sparse vectors.
    pub fn dot(&self, other: &DocVector) -> f64 {
        let (a, b) = (&self.0, &other.0);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Build the vocabulary and one TF-IDF vector per movie in a single pass
/// over the corpus (fit and transform together; no held-out vocabulary).
///
/// TF is the raw in-document term count. IDF is smoothed,
/// ln((N + 1) / (df + 1)) + 1, and each vector is L2-normalized afterwards,
/// so the linear kernel over these vectors equals cosine similarity.
/// Movies whose description is empty or all stopwords get a zero vector;
/// a corpus where every movie is like that yields an empty vocabulary and
/// all-zero vectors, which is degenerate but valid.
pub fn fit_transform(corpus: &Corpus) -> (Vocabulary, Vec<DocVector>) {
    let n = corpus.len();

    // Per-document raw term counts, assigning term ids on first sight.
    let mut terms: HashMap<String, TermId> = HashMap::new();
    let mut df: Vec<u32> = Vec::new();
    let mut counts: Vec<HashMap<TermId, u32>> = Vec::with_capacity(n);
    for movie in &corpus.movies {
        let mut tf: HashMap<TermId, u32> = HashMap::new();
        for term in tokenize(&movie.description) {
            let next_id = terms.len() as TermId;
            let tid = *terms.entry(term).or_insert(next_id);
            if tid as usize == df.len() {
                df.push(0);
            }
            *tf.entry(tid).or_insert(0) += 1;
        }
        for &tid in tf.keys() {
            df[tid as usize] += 1;
        }
        counts.push(tf);
    }

    // Weight and normalize.
    let mut vectors = Vec::with_capacity(n);
    for tf in counts {
        let mut entries: Vec<(TermId, f64)> = tf
            .into_iter()
            .map(|(tid, raw)| {
                let idf = ((n as f64 + 1.0) / (df[tid as usize] as f64 + 1.0)).ln() + 1.0;
                (tid, raw as f64 * idf)
            })
            .collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }
        entries.sort_by_key(|&(tid, _)| tid);
        vectors.push(DocVector(entries));
    }

    (Vocabulary { terms }, vectors)
}
