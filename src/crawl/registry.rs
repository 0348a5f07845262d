// src/crawl/registry.rs
// =============================================================================
// The visited-page registry: normalized URL -> how many times it was linked.
//
// Every crawl task shares one Registry through an Arc. The map itself is
// private; the only way to change it is `record_visit`, which does the
// "already seen?" check, the budget check, and the insert under one lock.
// Splitting those into separate steps would let two tasks both think they
// were first, or both squeeze into the last free slot.
//
// Rust concepts:
// - Interior mutability: &self methods that still mutate, via a Mutex
// - Arc: shared ownership across tasks (see engine.rs)
// =============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;

pub struct Registry {
    max_pages: usize,
    pages: Mutex<HashMap<String, usize>>,
}

impl Registry {
    // Creates an empty registry that will hold at most `max_pages` distinct pages
    pub fn new(max_pages: usize) -> Self {
        Self {
            max_pages,
            pages: Mutex::new(HashMap::new()),
        }
    }

    // Records one reference to `normalized_url`
    //
    // Returns true only for the first visit of a page that fits in the budget.
    // Known pages get their count bumped, unknown pages past the budget are
    // dropped without being recorded.
    pub fn record_visit(&self, normalized_url: &str) -> bool {
        let mut pages = self.pages.lock();

        if let Some(count) = pages.get_mut(normalized_url) {
            *count += 1;
            return false;
        }

        if pages.len() >= self.max_pages {
            return false;
        }

        pages.insert(normalized_url.to_string(), 1);
        true
    }

    // Number of distinct pages recorded so far
    //
    // Only a hint: another task may insert right after this returns.
    pub fn size(&self) -> usize {
        self.pages.lock().len()
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    // Copies the current contents into a read-only snapshot
    pub fn freeze(&self) -> PageCounts {
        PageCounts {
            pages: self.pages.lock().clone(),
        }
    }
}

// Final, read-only result of a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCounts {
    pages: HashMap<String, usize>,
}

impl PageCounts {
    pub fn get(&self, normalized_url: &str) -> Option<usize> {
        self.pages.get(normalized_url).copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.pages.iter().map(|(url, count)| (url.as_str(), *count))
    }
}

impl From<HashMap<String, usize>> for PageCounts {
    fn from(pages: HashMap<String, usize>) -> Self {
        Self { pages }
    }
}
