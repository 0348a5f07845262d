// src/page/mod.rs
// =============================================================================
// This module knows how to get a page and what links are on it.
//
// Submodules:
// - http: Downloads HTML pages with reqwest
// - html: Extracts links from HTML pages with scraper
//
// The crawl engine only talks to the two traits below, so tests can swap in
// an in-memory website instead of the network.
//
// Rust concepts:
// - Traits: Shared behavior that different types can implement
// - Trait objects (Arc<dyn Fetcher>): Pick the implementation at runtime
// - async_trait: Lets a trait have async methods and still be used as dyn
// =============================================================================

mod html;
mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::{FetchError, ParseError};

pub use html::HtmlLinkExtractor;
pub use http::HttpFetcher;

// Downloads the HTML body of a page
//
// Must fail for unreachable pages, status codes >= 400,
// and responses that are not text/html.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

// Finds the links on a page
//
// Every returned string is an absolute URL. Relative hrefs are resolved
// against `base_url`; hrefs that can't be parsed are skipped.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, html: &str, base_url: &Url) -> Result<Vec<String>, ParseError>;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Send + Sync on the traits?
//    - Crawl tasks run on many threads at once
//    - Send: the value may move to another thread
//    - Sync: several threads may use &value at the same time
//    - Arc<dyn Fetcher> needs both to be shared between tokio tasks
//
// 2. Why is extract_links not async?
//    - Parsing HTML is pure CPU work with no waiting
//    - scraper's Html type is not Send, so keeping it out of async code
//      avoids holding it across an .await
// -----------------------------------------------------------------------------
