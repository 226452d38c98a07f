pub mod corpus;
pub mod similarity;
pub mod snapshot;
pub mod tfidf;
pub mod tokenizer;

pub use corpus::{Corpus, Movie};
pub use similarity::SimilarityMatrix;
pub use snapshot::Snapshot;
pub use tfidf::{DocVector, TermId, Vocabulary};
