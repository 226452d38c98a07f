use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use engine::{Corpus, Movie, Snapshot};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputMovie {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Parser)]
#[command(name = "trainer")]
#[command(about = "Build the movie similarity snapshot from corpus files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a snapshot from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output snapshot file
        #[arg(long, default_value = "./model/recommender.bin")]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_snapshot(&input, &output),
    }
}

fn build_snapshot(input: &str, output: &str) -> Result<()> {
    let corpus = read_corpus(Path::new(input))?;
    if corpus.is_empty() {
        bail!("no movies found under {input}; refusing to build an empty snapshot");
    }
    tracing::info!(movies = corpus.len(), "ingested corpus");

    let snapshot = Snapshot::build(corpus)?;
    snapshot.save(output)?;
    tracing::info!(output, "snapshot build complete");
    Ok(())
}

fn read_corpus(input: &Path) -> Result<Corpus> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else {
        files.push(input.to_path_buf());
    }

    let mut corpus = Corpus::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut corpus)?;
        } else {
            read_json(&file, &mut corpus)?;
        }
    }
    Ok(corpus)
}

fn read_jsonl(file: &Path, corpus: &mut Corpus) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let m: InputMovie = serde_json::from_str(&line)?;
        corpus.push(Movie { title: m.title, description: m.description });
    }
    Ok(())
}

fn read_json(file: &Path, corpus: &mut Corpus) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let m: InputMovie = serde_json::from_value(v)?;
                corpus.push(Movie { title: m.title, description: m.description });
            }
        }
        serde_json::Value::Object(_) => {
            let m: InputMovie = serde_json::from_value(json)?;
            corpus.push(Movie { title: m.title, description: m.description });
        }
        _ => bail!("{} is not a movie object or array", file.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_jsonl_and_json_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.jsonl"),
            "{\"title\":\"A\",\"description\":\"first\"}\n\n{\"title\":\"B\",\"description\":\"second\"}\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.json"),
            "[{\"title\":\"C\",\"description\":\"third\"}]",
        )
        .unwrap();
        let corpus = read_corpus(dir.path()).unwrap();
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn non_movie_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(&file, "\"just a string\"").unwrap();
        assert!(read_corpus(&file).is_err());
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.json");
        fs::write(&file, "{\"title\":\"No Plot\"}").unwrap();
        let corpus = read_corpus(&file).unwrap();
        assert_eq!(corpus.movies[0].description, "");
    }

    #[test]
    fn end_to_end_build_writes_loadable_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("movies.jsonl");
        fs::write(
            &input,
            "{\"title\":\"X\",\"description\":\"time travel paradox\"}\n{\"title\":\"Y\",\"description\":\"a paradox of time travel\"}\n",
        )
        .unwrap();
        let out = dir.path().join("model/recommender.bin");
        build_snapshot(input.to_str().unwrap(), out.to_str().unwrap()).unwrap();
        let snap = Snapshot::load(&out).unwrap();
        assert_eq!(snap.recommend("X").unwrap(), vec!["Y"]);
    }
}
