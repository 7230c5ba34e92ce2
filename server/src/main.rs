//! CineSearch entry point
//!
//! Two modes:
//! - Query mode (default): embed the corpus, run one query, print ranked results
//! - Serve mode (--serve): interactive web front end for repeated queries

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinesearch_core::{EmbeddingEngine, MovieSearch, SearchResult};
use cinesearch_server::web::{WebConfig, WebServer};

#[derive(Parser)]
#[command(name = "cinesearch")]
#[command(about = "Semantic movie search over a CSV corpus")]
#[command(version)]
struct Args {
    /// Search query
    #[arg(short, long, required_unless_present = "serve")]
    query: Option<String>,

    /// Number of results to return
    #[arg(short = 'k', long, default_value_t = 5)]
    top_k: usize,

    /// Path to the corpus CSV file
    #[arg(short, long, default_value = "dataset.csv")]
    dataset: PathBuf,

    /// Run the interactive web front end instead of a one-shot query
    #[arg(long)]
    serve: bool,

    /// Bind host for the web front end
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port for the web front end
    #[arg(long, default_value_t = 4000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging to stderr so query output stays clean on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinesearch_server=info,cinesearch_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if args.serve {
        tracing::info!("starting web front end on {}:{}", args.host, args.port);

        let server = WebServer::new(WebConfig {
            host: args.host,
            port: args.port,
            dataset: args.dataset,
        });
        if let Err(e) = server.run().await {
            tracing::error!("web server error: {e}");
            std::process::exit(1);
        }
    } else {
        let query = args
            .query
            .expect("clap requires --query when --serve is absent");

        match run_query(&query, args.top_k, &args.dataset).await {
            Ok(results) => print_results(&results),
            Err(e) => {
                eprintln!("error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

/// Load the model and corpus, run one query, return the ranked results
async fn run_query(query: &str, top_k: usize, dataset: &Path) -> anyhow::Result<Vec<SearchResult>> {
    let query = query.to_string();
    let dataset = dataset.to_path_buf();

    // Model load and embedding are blocking; keep them off the runtime
    tokio::task::spawn_blocking(move || {
        let embedder = EmbeddingEngine::new().context("loading embedding model")?;
        let mut search = MovieSearch::new(embedder);
        search
            .load_csv(&dataset)
            .with_context(|| format!("loading corpus from {}", dataset.display()))?;
        Ok(search.search(&query, top_k)?)
    })
    .await
    .context("query task failed")?
}

fn print_results(results: &[SearchResult]) {
    println!("Search Results:");
    for result in results {
        println!(
            "Title: {}, Summary: {}, Similarity: {:.3}",
            result.document.title, result.document.summary, result.score
        );
    }
}
