use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Genre-based fallback against the TMDB catalog, used when a title is not
/// in the local corpus. Every failure mode collapses to a single-message
/// result list; the serving process never surfaces an error to the user.
#[derive(Clone)]
pub struct Client {
    api_key: Option<String>,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchMovie>,
}

#[derive(Deserialize)]
struct SearchMovie {
    title: String,
    #[serde(default)]
    genre_ids: Vec<u64>,
}

impl Client {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { api_key, http })
    }

    /// Search the title on TMDB, take the first hit's genres, and return the
    /// five most popular movies sharing those genres.
    pub async fn recommend_by_genre(&self, title: &str) -> Vec<String> {
        let api_key = match &self.api_key {
            Some(k) => k,
            None => {
                tracing::warn!("TMDB_API_KEY not set; genre fallback disabled");
                return vec!["Movie not found locally and the TMDB fallback is not configured.".to_string()];
            }
        };
        match self.lookup(api_key, title).await {
            Ok(titles) => titles,
            Err(err) => {
                tracing::warn!(title, error = %err, "TMDB genre fallback failed");
                vec!["Could not reach TMDB. Try again later.".to_string()]
            }
        }
    }

    async fn lookup(&self, api_key: &str, title: &str) -> Result<Vec<String>> {
        tracing::info!(title, "searching TMDB");
        let search: SearchResponse = self
            .http
            .get(format!("{BASE_URL}/search/movie"))
            .query(&[("api_key", api_key), ("query", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let movie = match search.results.into_iter().next() {
            Some(m) => m,
            None => return Ok(vec!["Movie not found on TMDB. Try another.".to_string()]),
        };
        if movie.genre_ids.is_empty() {
            return Ok(vec!["Could not find genre info. Try another.".to_string()]);
        }
        let genres = movie
            .genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let discover: SearchResponse = self
            .http
            .get(format!("{BASE_URL}/discover/movie"))
            .query(&[
                ("api_key", api_key),
                ("with_genres", genres.as_str()),
                ("sort_by", "popularity.desc"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(discover.results.into_iter().take(5).map(|m| m.title).collect())
    }
}
