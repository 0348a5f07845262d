// src/error.rs
// =============================================================================
// Error types shared by the crawler.
//
// Every error a single crawl task can hit is local to that task: it gets
// logged and the branch is dropped. Only ConfigError stops the program, and
// it happens before any crawling starts.
//
// We use `thiserror` to derive Display and Error for our enums.
// =============================================================================

use thiserror::Error;

// Why a crawl task gave up on a URL
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The URL string could not be parsed (or has no host)
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The URL points to a different host than the seed
    #[error("'{url}' is not on host {base_host}")]
    CrossDomain { url: String, base_host: String },

    /// The page could not be downloaded
    #[error("failed to fetch '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The page body could not be turned into links
    #[error("failed to extract links from '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },
}

impl CrawlError {
    /// Cross-domain links are routine, everything else is worth a warning
    pub fn is_routine(&self) -> bool {
        matches!(self, CrawlError::CrossDomain { .. })
    }
}

// Failure modes of the page fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, or body read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a status >= 400
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The response was not text/html
    #[error("unsupported content type '{0}'")]
    BadContentType(String),

    /// The server redirected to another host
    #[error("redirected off-host to '{0}'")]
    OffHostRedirect(String),
}

// The link extractor could not process the page
#[derive(Debug, Error)]
#[error("parse error: {0}")]
pub struct ParseError(pub String);

// Startup problems: these abort the program before crawling
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}
