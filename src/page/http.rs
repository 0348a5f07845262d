// src/page/http.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// Key functionality:
// - One reqwest Client reused for every request (connection pooling)
// - A per-request timeout so one slow server can't stall a crawl slot forever
// - Rejects error statuses (>= 400) and anything that isn't text/html
// - Follows redirects only while they stay on the same host
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - The ? operator with #[from]: reqwest errors turn into FetchError::Network
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::Fetcher;
use crate::crawl::host_key;
use crate::error::FetchError;

const USER_AGENT: &str = concat!("link-ranker/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

// Fetcher backed by a real HTTP client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(same_host_redirects())
            .build()?;
        Ok(Self { client })
    }
}

// Follows a redirect only if it lands on the host the request started on
//
// An off-host redirect is stopped, so the 3xx response reaches `fetch`
// and the other site is never requested.
fn same_host_redirects() -> Policy {
    Policy::custom(|attempt| {
        let too_many = attempt.previous().len() >= MAX_REDIRECTS;
        let same_host = attempt.previous().first().and_then(host_key) == host_key(attempt.url());

        if too_many {
            attempt.error("too many redirects")
        } else if same_host {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        if status.is_redirection() {
            let target = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
                .to_string();
            return Err(FetchError::OffHostRedirect(target));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("text/html") {
            return Err(FetchError::BadContentType(content_type));
        }

        let html = response.text().await?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    fn url_for(server: &Server, path: &str) -> Url {
        Url::parse(&format!("{}{}", server.url(), path)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<html><body>hi</body></html>")
            .create_async()
            .await;

        let html = fetcher().fetch(&url_for(&server, "/")).await.unwrap();

        assert_eq!(html, "<html><body>hi</body></html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone")
            .with_status(404)
            .with_header("content-type", "text/html")
            .with_body("not here")
            .create_async()
            .await;

        let err = fetcher().fetch(&url_for(&server, "/gone")).await.unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus(404)));
    }

    #[tokio::test]
    async fn test_non_html_is_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/data.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let err = fetcher()
            .fetch(&url_for(&server, "/data.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::BadContentType(ct) if ct == "application/json"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/raw")
            .with_status(200)
            .with_body("plain")
            .create_async()
            .await;

        let err = fetcher().fetch(&url_for(&server, "/raw")).await.unwrap_err();
        assert!(matches!(err, FetchError::BadContentType(_)));
    }

    #[tokio::test]
    async fn test_same_host_redirect_is_followed() {
        let mut server = Server::new_async().await;
        let _old = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create_async()
            .await;
        let _new = server
            .mock("GET", "/new")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<p>moved here</p>")
            .create_async()
            .await;

        let html = fetcher().fetch(&url_for(&server, "/old")).await.unwrap();
        assert_eq!(html, "<p>moved here</p>");
    }

    #[tokio::test]
    async fn test_off_host_redirect_is_not_followed() {
        let mut site = Server::new_async().await;
        let mut elsewhere = Server::new_async().await;
        let landing = format!("{}/landing", elsewhere.url());

        let _moved = site
            .mock("GET", "/moved")
            .with_status(302)
            .with_header("location", &landing)
            .create_async()
            .await;
        let never_hit = elsewhere
            .mock("GET", "/landing")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<p>other site</p>")
            .expect(0)
            .create_async()
            .await;

        let err = fetcher().fetch(&url_for(&site, "/moved")).await.unwrap_err();

        assert!(matches!(err, FetchError::OffHostRedirect(target) if target == landing));
        never_hit.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is almost never listening
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
