// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout only carries the report)
// 3. Crawl the website
// 4. Print the ranked report
// 5. Exit with proper code (0 = success, 1 = bad arguments or setup error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use link_ranker::crawl::Crawler;
use link_ranker::page::{HtmlLinkExtractor, HttpFetcher};
use link_ranker::report;

#[tokio::main]
async fn main() {
    // clap exits with code 2 on bad input by default; we want 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

// RUST_LOG wins over --verbose when it is set
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let (seed, base_host) = cli.crawl_target()?;

    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout_secs))
        .context("failed to create HTTP client")?;
    let crawler = Crawler::new(Arc::new(fetcher), Arc::new(HtmlLinkExtractor));

    eprintln!("starting crawl of: {}", seed);

    let pages = crawler
        .crawl(seed.as_str(), &base_host, cli.concurrency, cli.max_pages())
        .await;

    if pages.is_empty() {
        eprintln!("no pages were crawled");
    }

    report::print_report(&pages, seed.as_str(), cli.json)
}
