// src/crawl/engine.rs
// =============================================================================
// The crawl engine: recursive, bounded-concurrency, same-domain crawling.
//
// How it works:
// 1. The seed URL becomes the first task
// 2. A task waits for one of `concurrency` slots (a tokio Semaphore)
// 3. It checks the URL (budget, host, normalization, registry)
// 4. It fetches the page and extracts its links
// 5. Every link becomes a new task, spawned onto the runtime
// 6. The crawl ends when the in-flight counter drops to zero
//
// Nothing a single task does can fail the crawl. Problems are logged and
// only that branch stops.
//
// Rust concepts:
// - Arc: every task holds a cheap handle to the shared state
// - BoxFuture: a task spawns tasks of its own type, so its future must have
//   a nameable type
// - Drop guards: the semaphore permit and the in-flight guard clean up on
//   every exit path
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use super::inflight::{InFlight, TaskGuard};
use super::normalize::{host_key, normalize_url};
use super::registry::{PageCounts, Registry};
use crate::error::CrawlError;
use crate::page::{Fetcher, LinkExtractor};

// Runs crawls using the given page fetcher and link extractor
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn LinkExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    // Crawls every page reachable from `seed_url` on `base_host`
    //
    // Parameters:
    //   seed_url: absolute URL to start from
    //   base_host: only URLs whose host (and port) equal this get crawled
    //   concurrency: max number of pages being fetched/parsed at once
    //   max_pages: max number of distinct pages recorded
    //
    // Returns the visit counts once every task has finished.
    pub async fn crawl(
        &self,
        seed_url: &str,
        base_host: &str,
        concurrency: usize,
        max_pages: usize,
    ) -> PageCounts {
        let run = CrawlRun {
            base_host: Arc::from(base_host),
            registry: Arc::new(Registry::new(max_pages)),
            slots: Arc::new(Semaphore::new(concurrency.clamp(1, Semaphore::MAX_PERMITS))),
            in_flight: InFlight::new(),
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
        };

        info!(seed = seed_url, base_host, concurrency, max_pages, "starting crawl");

        run.spawn(seed_url.to_string());
        run.in_flight.wait_idle().await;

        let pages = run.registry.freeze();
        info!(pages = pages.len(), "crawl finished");
        pages
    }
}

// State shared by all tasks of one crawl run
//
// A fresh CrawlRun is built for every call to `Crawler::crawl`, so two crawls
// never share a registry, slot pool, or counter.
#[derive(Clone)]
struct CrawlRun {
    base_host: Arc<str>,
    registry: Arc<Registry>,
    slots: Arc<Semaphore>,
    in_flight: Arc<InFlight>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
}

impl CrawlRun {
    // Schedules a crawl task for `raw_url`
    //
    // The in-flight counter goes up here, before the task exists, so the
    // crawl cannot look finished while a child is still being launched.
    fn spawn(&self, raw_url: String) {
        let guard = self.in_flight.start();
        tokio::spawn(self.clone().crawl_page(raw_url, guard));
    }

    fn crawl_page(self, raw_url: String, guard: TaskGuard) -> BoxFuture<'static, ()> {
        async move {
            // Declared first so it drops last: slot released, then task counted out
            let _guard = guard;

            let _slot = match self.slots.acquire().await {
                Ok(permit) => permit,
                Err(_) => return,
            };

            if self.registry.size() >= self.registry.max_pages() {
                debug!(url = %raw_url, "page budget reached, skipping");
                return;
            }

            match self.visit(&raw_url).await {
                Ok(links) => {
                    for link in links {
                        self.spawn(link);
                    }
                }
                Err(e) if e.is_routine() => debug!("skipping: {}", e),
                Err(e) => warn!("skipping: {}", e),
            }
        }
        .boxed()
    }

    // Checks, records, fetches, and parses one page
    //
    // Returns the links found on the page, or an empty list when the page was
    // already known or did not fit in the budget.
    async fn visit(&self, raw_url: &str) -> Result<Vec<String>, CrawlError> {
        let url = Url::parse(raw_url).map_err(|e| CrawlError::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        if host_key(&url).as_deref() != Some(&*self.base_host) {
            return Err(CrawlError::CrossDomain {
                url: raw_url.to_string(),
                base_host: self.base_host.to_string(),
            });
        }

        let normalized = normalize_url(raw_url)?;

        if !self.registry.record_visit(&normalized) {
            debug!(url = %normalized, "already visited or over budget");
            return Ok(Vec::new());
        }

        info!(url = %url, "checking");
        let html = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|source| CrawlError::Fetch {
                url: raw_url.to_string(),
                source,
            })?;

        self.extractor
            .extract_links(&html, &url)
            .map_err(|source| CrawlError::Parse {
                url: raw_url.to_string(),
                source,
            })
    }
}
