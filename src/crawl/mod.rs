// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Concurrent crawling with a fixed number of fetch slots
// - Same-host restriction (doesn't crawl external sites)
// - Deduplication by normalized URL (host + path)
// - A page budget that caps how many distinct pages get recorded
// - Counts how often each page is linked to
//
// Submodules:
// - normalize: URL -> dedup key
// - registry: the shared visited-page map
// - inflight: knows when every crawl task has finished
// - engine: schedules the crawl tasks
// =============================================================================

mod engine;
mod inflight;
mod normalize;
mod registry;

// Re-export the public crawling API
pub use engine::Crawler;
pub use normalize::{host_key, normalize_url};
pub use registry::PageCounts;
