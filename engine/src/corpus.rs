use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    /// Free text; may be empty. An empty description vectorizes to a zero vector.
    pub description: String,
}

/// Ordered movie table. A movie's position is its stable id for the lifetime
/// of one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub movies: Vec<Movie>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, movie: Movie) {
        self.movies.push(movie);
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Case-insensitive title lookup. Titles are not unique; the first match
    /// in corpus order wins (shadowing later duplicates, as the source did).
    pub fn find_title(&self, title: &str) -> Option<usize> {
        let needle = title.to_lowercase();
        self.movies.iter().position(|m| m.title.to_lowercase() == needle)
    }

    pub fn title(&self, idx: usize) -> &str {
        &self.movies[idx].title
    }
}
