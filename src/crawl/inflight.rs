// src/crawl/inflight.rs
// =============================================================================
// Counts crawl tasks that are scheduled but not finished.
//
// Each task owns a TaskGuard. Creating the guard bumps the counter, dropping
// it lowers the counter, so a task is counted out exactly once however it
// ends (normal return, early skip, or panic). The crawl is over when the
// counter hits zero; `wait_idle` sleeps until then.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Default)]
pub struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // Registers one more outstanding task
    pub fn start(self: &Arc<Self>) -> TaskGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        TaskGuard {
            tracker: Arc::clone(self),
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    // Waits until no task is outstanding
    //
    // notify_one stores a permit when nobody is waiting yet, so a task that
    // finishes between the load and the await still wakes us up.
    pub async fn wait_idle(&self) {
        while self.count() != 0 {
            self.idle.notified().await;
        }
    }
}

pub struct TaskGuard {
    tracker: Arc<InFlight>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.tracker.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.tracker.idle.notify_one();
        }
    }
}
