// src/crawl/normalize.rs
// =============================================================================
// Turns a URL into the key we use to decide "is this the same page?".
//
// The key is host + path:
// - the scheme is dropped (http://a.com/x and https://a.com/x are one page)
// - query strings and fragments are dropped
// - an empty path becomes "/"
// - a non-default port stays in the key (a.com:8080/ != a.com/)
// - trailing slashes are kept as-is ("a.com/foo" != "a.com/foo/")
// =============================================================================

use url::Url;

use crate::error::CrawlError;

// Normalizes an absolute URL into its dedup key
//
// Example:
//   "https://Blog.example.com/path?page=2#top" -> "blog.example.com/path"
//   "http://example.com" -> "example.com/"
pub fn normalize_url(raw_url: &str) -> Result<String, CrawlError> {
    let url = Url::parse(raw_url).map_err(|e| CrawlError::InvalidUrl {
        url: raw_url.to_string(),
        reason: e.to_string(),
    })?;

    let host = host_key(&url).ok_or_else(|| CrawlError::InvalidUrl {
        url: raw_url.to_string(),
        reason: "URL has no host".to_string(),
    })?;

    let path = match url.path() {
        "" => "/",
        path => path,
    };

    Ok(format!("{}{}", host, path))
}

// Returns "host" or "host:port" for a URL
//
// The url crate already drops default ports (80 for http, 443 for https),
// so http://a.com:80/ and http://a.com/ share a key.
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}
