use engine::tokenizer::tokenize;

#[test]
fn it_lowercases_and_normalizes() {
    let words = tokenize("Amélie visits a Café in MONTMARTRE.");
    assert!(words.contains(&"amélie".to_string()));
    // NFKC folds compatibility forms; composed accents survive lowercasing.
    assert!(words.contains(&"café".to_string()));
    assert!(words.contains(&"montmartre".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}

#[test]
fn punctuation_delimits_tokens() {
    let words = tokenize("war/peace,love;loss");
    assert_eq!(words, vec!["war", "peace", "love", "loss"]);
}
