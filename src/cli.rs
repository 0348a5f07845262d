// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   link-ranker <SEED_URL> [CONCURRENCY] [MAX_PAGES] [--json] [--verbose]
//
// clap handles the parsing; `Cli::crawl_target` does the checks clap can't
// express (the seed must be an absolute http(s) URL with a host).
// =============================================================================

use clap::Parser;
use url::Url;

use link_ranker::crawl::host_key;
use link_ranker::error::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "link-ranker",
    version,
    about = "Crawl a website and rank its pages by how often they are linked internally",
    long_about = "link-ranker starts at a seed URL, follows every link that stays on the same host, \
                  and reports how many internal links point at each page it found."
)]
pub struct Cli {
    /// Website URL to start crawling from (e.g., https://example.com)
    pub seed_url: String,

    /// Maximum number of pages fetched at the same time
    #[arg(default_value_t = 2)]
    pub concurrency: usize,

    /// Maximum number of distinct pages to record (default: unlimited)
    pub max_pages: Option<usize>,

    /// Output the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Log every page as it is crawled
    #[arg(short, long)]
    pub verbose: bool,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn max_pages(&self) -> usize {
        self.max_pages.unwrap_or(usize::MAX)
    }

    // Validates the seed URL and returns it with the host we crawl on
    pub fn crawl_target(&self) -> Result<(Url, String), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        let invalid = |reason: &str| ConfigError::InvalidSeed {
            url: self.seed_url.clone(),
            reason: reason.to_string(),
        };

        let seed = Url::parse(&self.seed_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(seed.scheme(), "http" | "https") {
            return Err(invalid("only http and https URLs can be crawled"));
        }
        let base_host = host_key(&seed).ok_or_else(|| invalid("URL has no host"))?;

        Ok((seed, base_host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("link-ranker").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["https://example.com"]).unwrap();
        assert_eq!(cli.concurrency, 2);
        assert_eq!(cli.max_pages(), usize::MAX);
        assert!(!cli.json);
    }

    #[test]
    fn test_positional_numbers() {
        let cli = parse(&["https://example.com", "8", "25"]).unwrap();
        assert_eq!(cli.concurrency, 8);
        assert_eq!(cli.max_pages(), 25);
    }

    #[test]
    fn test_missing_seed_is_an_error() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_extra_argument_is_an_error() {
        assert!(parse(&["https://example.com", "1", "2", "3"]).is_err());
    }

    #[test]
    fn test_non_numeric_concurrency_is_an_error() {
        assert!(parse(&["https://example.com", "many"]).is_err());
        assert!(parse(&["https://example.com", "2", "lots"]).is_err());
    }

    #[test]
    fn test_crawl_target_host_includes_port() {
        let cli = parse(&["http://localhost:8080/docs/"]).unwrap();
        let (seed, host) = cli.crawl_target().unwrap();
        assert_eq!(seed.as_str(), "http://localhost:8080/docs/");
        assert_eq!(host, "localhost:8080");
    }

    #[test]
    fn test_crawl_target_rejects_bad_seeds() {
        for seed in ["example.com", "ftp://example.com/", "not a url"] {
            let cli = parse(&[seed]).unwrap();
            assert!(
                matches!(cli.crawl_target(), Err(ConfigError::InvalidSeed { .. })),
                "seed: {}",
                seed
            );
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let cli = parse(&["https://example.com", "0"]).unwrap();
        assert!(matches!(cli.crawl_target(), Err(ConfigError::ZeroConcurrency)));
    }
}
