use anyhow::{bail, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::{fmt, EnvFilter};

const BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Parser, Debug)]
#[command(name = "scraper")]
#[command(about = "Fetch popular movies from TMDB into a JSONL corpus")]
struct Cli {
    /// TMDB API key (falls back to the TMDB_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,
    /// Number of movies to fetch
    #[arg(long, default_value_t = 50)]
    count: usize,
    /// Output JSONL file path
    #[arg(long, default_value = "./data/movies.jsonl")]
    output: String,
    /// Delay between page requests, in milliseconds
    #[arg(long, default_value_t = 250)]
    delay_ms: u64,
}

#[derive(Deserialize)]
struct PopularResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
    #[serde(default)]
    total_pages: u32,
}

#[derive(Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

#[derive(Serialize)]
struct OutMovie<'a> {
    title: &'a str,
    description: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let api_key = match args.api_key.clone().or_else(|| std::env::var("TMDB_API_KEY").ok()) {
        Some(k) => k,
        None => bail!("no TMDB API key; pass --api-key or set TMDB_API_KEY"),
    };
    if let Some(dir) = std::path::Path::new(&args.output).parent() {
        fs::create_dir_all(dir)?;
    }

    let client = reqwest::Client::builder().timeout(Duration::from_secs(12)).build()?;
    let mut out = BufWriter::new(File::create(&args.output)?);
    let mut emitted = 0usize;
    let mut page = 1u32;

    while emitted < args.count {
        let page_str = page.to_string();
        let resp: PopularResponse = client
            .get(format!("{BASE_URL}/movie/popular"))
            .query(&[
                ("api_key", api_key.as_str()),
                ("language", "en-US"),
                ("page", page_str.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if resp.results.is_empty() {
            break;
        }
        for movie in &resp.results {
            // Keep only records that carry both a title and a real overview.
            let (title, overview) = match (&movie.title, &movie.overview) {
                (Some(t), Some(o)) if !t.is_empty() && !o.trim().is_empty() => {
                    (t.as_str(), o.trim())
                }
                _ => continue,
            };
            serde_json::to_writer(&mut out, &OutMovie { title, description: overview })?;
            out.write_all(b"\n")?;
            emitted += 1;
            if emitted >= args.count {
                break;
            }
        }
        tracing::info!(page, emitted, "fetched TMDB page");
        if resp.total_pages > 0 && page >= resp.total_pages {
            break;
        }
        page += 1;
        sleep(Duration::from_millis(args.delay_ms)).await;
    }
    out.flush()?;

    if emitted == 0 {
        bail!("no valid movies fetched from TMDB");
    }
    tracing::info!(emitted, output = %args.output, "corpus scrape complete");
    Ok(())
}
