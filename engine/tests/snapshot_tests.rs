use engine::{Corpus, Movie, Snapshot};
use std::fs;

fn corpus(pairs: &[(&str, &str)]) -> Corpus {
    Corpus {
        movies: pairs
            .iter()
            .map(|(t, d)| Movie { title: t.to_string(), description: d.to_string() })
            .collect(),
    }
}

#[test]
fn empty_corpus_aborts_build() {
    assert!(Snapshot::build(Corpus::new()).is_err());
}

#[test]
fn all_empty_descriptions_build_succeeds() {
    let snap = Snapshot::build(corpus(&[("A", ""), ("B", "")])).unwrap();
    assert_eq!(snap.similarity.len(), 2);
    assert_eq!(snap.similarity.get(0, 1), 0.0);
}

#[test]
fn save_then_load_round_trips_recommendations() {
    let snap = Snapshot::build(corpus(&[
        ("First", "ghost ship drifting through fog"),
        ("Second", "a ghost ship lost in fog"),
        ("Third", "stand-up comedy special"),
    ]))
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recommender.bin");
    snap.save(&path).unwrap();

    let loaded = Snapshot::load(&path).unwrap();
    assert_eq!(loaded.corpus.len(), 3);
    let recs = loaded.recommend("First").unwrap();
    assert_eq!(recs[0], "Second");
    assert_eq!(recs[1], "Third");
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let snap = Snapshot::build(corpus(&[("Only", "plot")])).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recommender.bin");
    snap.save(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn missing_snapshot_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Snapshot::load(dir.path().join("nope.bin")).is_err());
}

#[test]
fn corrupt_snapshot_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recommender.bin");
    fs::write(&path, b"definitely not bincode").unwrap();
    assert!(Snapshot::load(&path).is_err());
}

// bincode encodes a struct as its fields in order, so a tuple with the same
// field sequence produces a blob that decodes as a Snapshot. These forge
// snapshots that decode fine but lie about their matrix; load must reject
// them instead of letting a later recommend() slice out of bounds.

#[test]
fn decodable_but_truncated_matrix_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recommender.bin");
    let movies = corpus(&[("a", "plot one"), ("b", "plot two")]);
    // Claims to be 5x5 but carries only 4 entries.
    let bytes = bincode::serialize(&(1u32, &movies, (5usize, vec![0.0f64; 4]))).unwrap();
    fs::write(&path, bytes).unwrap();
    assert!(Snapshot::load(&path).is_err());
}

#[test]
fn matrix_size_must_match_corpus_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recommender.bin");
    let movies = corpus(&[("a", "plot one"), ("b", "plot two")]);
    // A well-formed 3x3 matrix, but the corpus has 2 movies.
    let bytes = bincode::serialize(&(1u32, &movies, (3usize, vec![0.0f64; 9]))).unwrap();
    fs::write(&path, bytes).unwrap();
    assert!(Snapshot::load(&path).is_err());
}
