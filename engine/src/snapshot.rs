use crate::corpus::Corpus;
use crate::similarity::SimilarityMatrix;
use crate::tfidf::fit_transform;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, rename, File};
use std::io::{Read, Write};
use std::path::Path;

/// Bumped whenever the serialized layout changes; load refuses other versions.
pub const FORMAT_VERSION: u32 = 1;

/// Maximum number of titles a recommendation returns.
pub const MAX_RESULTS: usize = 5;

/// Immutable (corpus, similarity matrix) bundle. Built once offline, loaded
/// read-only by the serving process, never mutated; a rebuild writes a new
/// file that atomically replaces the old one.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub corpus: Corpus,
    pub similarity: SimilarityMatrix,
}

impl Snapshot {
    /// Vectorize the corpus and compute the all-pairs similarity matrix.
    /// An empty corpus aborts the build; a corpus of empty descriptions is
    /// degenerate but valid (all scores 0.0).
    pub fn build(corpus: Corpus) -> Result<Self> {
        if corpus.is_empty() {
            bail!("cannot build a snapshot from an empty corpus");
        }
        let (vocabulary, vectors) = fit_transform(&corpus);
        tracing::debug!(
            movies = corpus.len(),
            terms = vocabulary.len(),
            "vectorized corpus"
        );
        let similarity = SimilarityMatrix::from_vectors(&vectors);
        Ok(Self { version: FORMAT_VERSION, corpus, similarity })
    }

    /// Serialize to `path`, writing a sibling temp file first and renaming it
    /// over the target so readers only ever observe a complete snapshot.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                create_dir_all(dir)?;
            }
        }
        let tmp = path.with_extension("tmp");
        let bytes = bincode::serialize(self)?;
        let mut f = File::create(&tmp)?;
        f.write_all(&bytes)?;
        rename(&tmp, path)?;
        Ok(())
    }

    /// Load a snapshot as one unit. A missing file, corrupt bytes, a format
    /// version mismatch, or a decoded blob whose matrix disagrees with its
    /// corpus all fail with an error rather than a panic.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut f = File::open(path)
            .with_context(|| format!("opening snapshot {}", path.display()))?;
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)?;
        let snapshot: Snapshot = bincode::deserialize(&buf)
            .with_context(|| format!("decoding snapshot {}", path.display()))?;
        if snapshot.version != FORMAT_VERSION {
            bail!(
                "snapshot {} has format version {}, expected {}",
                path.display(),
                snapshot.version,
                FORMAT_VERSION
            );
        }
        // The blob may decode and still be inconsistent; never serve from it.
        if !snapshot.similarity.storage_consistent() {
            bail!("snapshot {} has a corrupt similarity matrix", path.display());
        }
        if snapshot.similarity.len() != snapshot.corpus.len() {
            bail!(
                "snapshot {} has a {}-row matrix for {} movies",
                path.display(),
                snapshot.similarity.len(),
                snapshot.corpus.len()
            );
        }
        Ok(snapshot)
    }

    /// Top similar titles for `title`, at most [`MAX_RESULTS`], best first.
    /// Returns `None` when the title is not in the corpus; that is a normal
    /// outcome the caller routes to its fallback, not an error. Read-only.
    pub fn recommend(&self, title: &str) -> Option<Vec<String>> {
        let idx = self.corpus.find_title(title)?;
        let mut scored: Vec<(usize, f64)> = self
            .similarity
            .row(idx)
            .iter()
            .copied()
            .enumerate()
            .collect();
        // Stable sort over ascending-index input: ties keep the lower index.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Some(
            scored
                .into_iter()
                .filter(|&(j, _)| j != idx)
                .take(MAX_RESULTS)
                .map(|(j, _)| self.corpus.title(j).to_string())
                .collect(),
        )
    }
}
