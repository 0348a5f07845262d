// src/lib.rs
// =============================================================================
// Library half of link-ranker.
//
// The binary (src/main.rs) only parses arguments, sets up logging, and wires
// these modules together. Keeping the crawler in a library lets the tests
// drive it with a fake website instead of the network.
// =============================================================================

pub mod crawl;   // src/crawl/ - the concurrent crawl engine
pub mod error;   // src/error.rs - error types
pub mod page;    // src/page/ - fetching pages and extracting links
pub mod report;  // src/report.rs - ranking and printing results
