// src/page/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Parse and validate URLs
// - Resolve relative URLs to absolute URLs
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use super::LinkExtractor;
use crate::error::ParseError;

// Link extractor that reads <a href="..."> tags
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    // Example:
    //   html = "<a href='/docs'>Docs</a>"
    //   base_url = "https://example.com/page"
    //   result = ["https://example.com/docs"]
    fn extract_links(&self, html: &str, base_url: &Url) -> Result<Vec<String>, ParseError> {
        let selector = Selector::parse("a[href]")
            .map_err(|e| ParseError(format!("invalid CSS selector: {:?}", e)))?;

        let document = Html::parse_document(html);

        let links = document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve_url(base_url, href))
            .filter(|url| is_crawlable_link(url))
            .map(|url| url.to_string())
            .collect();

        Ok(links)
    }
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "http://[::1" -> None (malformed)
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(href).ok(),
        Err(_) => None,
    }
}

// Only http(s) pages can be crawled; mailto:, tel:, javascript: are dropped
fn is_crawlable_link(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does "a[href]" mean?
//    - It's a CSS selector: "all <a> tags that have an href attribute"
//    - Same syntax as document.querySelectorAll in a browser
//
// 2. Why match on url::ParseError::RelativeUrlWithoutBase?
//    - Url::parse only accepts absolute URLs
//    - A relative href like "/docs" fails with exactly this error
//    - Any other error means the href is broken, so we skip it
//
// 3. What is filter_map?
//    - map + filter in one step
//    - The closure returns Option: Some(x) keeps x, None drops the item
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str, base: &str) -> Vec<String> {
        HtmlLinkExtractor
            .extract_links(html, &Url::parse(base).unwrap())
            .unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract(html, "https://example.com");
        assert_eq!(links, vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a>"#;
        let links = extract(html, "https://example.com/page");
        assert_eq!(links, vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_resolve_against_page_directory() {
        let html = r#"<a href="intro">Intro</a><a href="../about">About</a>"#;
        let links = extract(html, "https://example.com/guide/start");
        assert_eq!(
            links,
            vec!["https://example.com/guide/intro", "https://example.com/about"]
        );
    }

    #[test]
    fn test_skip_mailto_and_javascript() {
        let html = r#"
            <a href="mailto:test@example.com">Email</a>
            <a href="javascript:void(0)">Nothing</a>
        "#;
        let links = extract(html, "https://example.com");
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_malformed_href_but_keep_others() {
        let html = r#"
            <a href="http://[::1">Broken</a>
            <a href="/fine">Fine</a>
        "#;
        let links = extract(html, "https://example.com/");
        assert_eq!(links, vec!["https://example.com/fine"]);
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let html = r#"<a name="top">Top</a><a href="/x">X</a>"#;
        let links = extract(html, "https://example.com/");
        assert_eq!(links, vec!["https://example.com/x"]);
    }

    #[test]
    fn test_nested_and_repeated_links() {
        let html = r#"
            <html><body>
              <nav><ul><li><a href="/a">A</a></li></ul></nav>
              <main><p><a href="/a">A again</a></p></main>
            </body></html>
        "#;
        let links = extract(html, "https://example.com/");
        assert_eq!(links, vec!["https://example.com/a", "https://example.com/a"]);
    }
}
