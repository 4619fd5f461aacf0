use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use vsm_core::persist::load_index;
use vsm_core::{Retriever, WeightingScheme};

use std::fmt as stdfmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One line of a batch file: `{"id": "q1", "terms": ["cat", "dog"]}`.
#[derive(Debug, Deserialize)]
struct QueryLine {
    id: QueryId,
    terms: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QueryId {
    Number(u64),
    Text(String),
}

impl stdfmt::Display for QueryId {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        match self {
            QueryId::Number(n) => write!(f, "{n}"),
            QueryId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "retrieve")]
#[command(about = "Rank documents of an inverted index against tokenized queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query given as already-tokenized terms
    Search {
        /// Index file (.json, otherwise bincode)
        #[arg(long)]
        index: String,
        /// Weighting scheme: binary, tf or tfidf
        #[arg(long, default_value = "tfidf")]
        weighting: WeightingScheme,
        /// Print the cosine score next to each document id
        #[arg(long, default_value_t = false)]
        scores: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
        /// Query terms
        terms: Vec<String>,
    },
    /// Run every query of a JSON-lines file, writing `query_id doc_id` lines
    Batch {
        #[arg(long)]
        index: String,
        /// JSON lines with `id` and `terms`
        #[arg(long)]
        queries: String,
        #[arg(long, default_value = "tfidf")]
        weighting: WeightingScheme,
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<String>,
    },
    /// Print corpus statistics of an index
    Stats {
        #[arg(long)]
        index: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { index, weighting, scores, format, terms } => search(&index, weighting, scores, format, &terms),
        Commands::Batch { index, queries, weighting, output } => batch(&index, &queries, weighting, output.as_deref()),
        Commands::Stats { index } => stats(&index),
    }
}

fn open_retriever(index: &str, weighting: WeightingScheme) -> Result<Retriever> {
    let index = load_index(index)?;
    let retriever = Retriever::new(&index, weighting).context("building retriever")?;
    Ok(retriever)
}

fn search(index: &str, weighting: WeightingScheme, scores: bool, format: Format, terms: &[String]) -> Result<()> {
    let retriever = open_retriever(index, weighting)?;
    let results = retriever.query_scored(terms);
    let mut out = io::stdout().lock();
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &results)?;
            writeln!(out)?;
        }
        Format::Text => {
            for hit in &results {
                if scores {
                    writeln!(out, "{}\t{:.6}", hit.doc_id, hit.score)?;
                } else {
                    writeln!(out, "{}", hit.doc_id)?;
                }
            }
        }
    }
    Ok(())
}

fn batch(index: &str, queries: &str, weighting: WeightingScheme, output: Option<&str>) -> Result<()> {
    let retriever = open_retriever(index, weighting)?;
    let reader = BufReader::new(File::open(queries).with_context(|| format!("opening queries {queries}"))?);
    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(Path::new(path))?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut num_queries = 0usize;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let query: QueryLine = serde_json::from_str(&line).with_context(|| format!("{queries}:{}", lineno + 1))?;
        for doc_id in retriever.query(&query.terms) {
            writeln!(out, "{} {}", query.id, doc_id)?;
        }
        num_queries += 1;
    }
    out.flush()?;
    tracing::info!(num_queries, %weighting, "batch complete");
    Ok(())
}

fn stats(index: &str) -> Result<()> {
    let index = load_index(index)?;
    println!("num_docs\t{}", index.num_docs());
    println!("num_terms\t{}", index.num_terms());
    println!("postings\t{}", index.total_postings());
    Ok(())
}
