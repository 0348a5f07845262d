// src/report.rs
// =============================================================================
// Turns the crawl results into the final ranked report.
//
// Pages are sorted by how many internal links point at them (most first),
// ties broken alphabetically so the output is stable between runs.
// =============================================================================

use anyhow::Result;
use serde::Serialize;

use crate::crawl::PageCounts;

// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPage {
    pub url: String,
    pub count: usize,
}

// Sorts pages by descending count, then ascending URL
pub fn rank_pages(pages: &PageCounts) -> Vec<RankedPage> {
    let mut ranked: Vec<RankedPage> = pages
        .iter()
        .map(|(url, count)| RankedPage {
            url: url.to_string(),
            count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.url.cmp(&b.url)));
    ranked
}

// Renders the human-readable report
pub fn format_report(ranked: &[RankedPage], seed_url: &str) -> String {
    let line = "=".repeat(29);
    let mut out = format!("{}\n  REPORT for {}\n{}\n", line, seed_url, line);
    for page in ranked {
        out.push_str(&format!(
            "Found {} internal links to {}\n",
            page.count, page.url
        ));
    }
    out
}

// Prints the report either as text or JSON
pub fn print_report(pages: &PageCounts, seed_url: &str, json: bool) -> Result<()> {
    let ranked = rank_pages(pages);
    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print!("{}", format_report(&ranked, seed_url));
    }
    Ok(())
}
