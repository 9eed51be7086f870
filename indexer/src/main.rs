use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use parindex::{FileDocument, InvertedIndex};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory inverted index in parallel and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time index builds over a directory for several worker counts
    Bench {
        /// Input directory; every regular file under it is a document
        #[arg(long)]
        input: String,
        /// Worker counts to measure
        #[arg(long, value_delimiter = ',', default_values_t = [1usize, 2, 3, 4, 5, 6, 7, 8])]
        threads: Vec<usize>,
        /// Builds per worker count
        #[arg(long, default_value_t = 10)]
        runs: usize,
        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build once and print the documents containing all terms
    Search {
        /// Input directory; every regular file under it is a document
        #[arg(long)]
        input: String,
        /// Worker count for the build
        #[arg(long, default_value_t = 4)]
        threads: usize,
        /// Query terms
        #[arg(required = true)]
        terms: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
struct BenchReport {
    input: String,
    documents: usize,
    runs: usize,
    created_at: String,
    /// worker count -> mean build time in nanoseconds
    mean_nanos: BTreeMap<usize, f64>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { input, threads, runs, json } => bench(&input, &threads, runs, json),
        Commands::Search { input, threads, terms } => search(&input, threads, &terms),
    }
}

/// Regular files under `root`, sorted by path so the document order is stable.
fn list_documents(root: &Path) -> Result<Vec<FileDocument>> {
    if !root.is_dir() {
        bail!("input {} is not a directory", root.display());
    }
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files.into_iter().map(FileDocument::new).collect())
}

fn bench(input: &str, threads: &[usize], runs: usize, json: bool) -> Result<()> {
    if runs == 0 {
        bail!("--runs must be at least 1");
    }
    let docs = list_documents(Path::new(input))?;
    tracing::info!(input, documents = docs.len(), "corpus loaded");

    let mut totals: BTreeMap<usize, f64> = BTreeMap::new();
    for _ in 0..runs {
        for &workers in threads {
            let index = InvertedIndex::new();
            let elapsed = index.build(&docs, workers)?;
            *totals.entry(workers).or_insert(0.0) += elapsed.as_nanos() as f64;
        }
    }
    let mean_nanos: BTreeMap<usize, f64> = totals.into_iter().map(|(w, t)| (w, t / runs as f64)).collect();

    let report = BenchReport {
        input: input.to_string(),
        documents: docs.len(),
        runs,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        mean_nanos,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Test for dir : {} with {} documents", report.input, report.documents);
        for (workers, nanos) in &report.mean_nanos {
            println!("Indexing by {workers} threads took {nanos:.0} nanoseconds");
        }
    }
    Ok(())
}

fn search(input: &str, threads: usize, terms: &[String]) -> Result<()> {
    let docs = list_documents(Path::new(input))?;
    let index = InvertedIndex::new();
    let elapsed = index.build(&docs, threads)?;
    tracing::info!(terms = index.len(), elapsed_ms = elapsed.as_secs_f64() * 1000.0, "index ready");

    let mut hits: Vec<String> = index.search(terms).into_iter().collect();
    hits.sort();
    println!("Search for: {}", terms.join(" "));
    println!("{} documents:", hits.len());
    for id in hits {
        println!("{id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_regular_files_in_path_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("neg")).unwrap();
        fs::write(dir.path().join("neg/2.txt"), "bad").unwrap();
        fs::write(dir.path().join("1.txt"), "good").unwrap();
        let docs = list_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].path().ends_with("1.txt"));
        assert!(docs[1].path().ends_with("neg/2.txt"));
    }

    #[test]
    fn rejects_missing_input() {
        let dir = tempdir().unwrap();
        assert!(list_documents(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn parses_thread_list() {
        let cli = Cli::try_parse_from(["indexer", "bench", "--input", "d", "--threads", "1,4"]).unwrap();
        match cli.command {
            Commands::Bench { threads, runs, .. } => {
                assert_eq!(threads, vec![1, 4]);
                assert_eq!(runs, 10);
            }
            _ => panic!("expected bench"),
        }
    }
}
