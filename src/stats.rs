use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

// Needed stats:
// - pages crawled / failed
// - items scraped
// - runtime of the crawl

pub struct Stats {
    total_crawled: AtomicU64,
    total_failed: AtomicU64,
    total_scraped: AtomicU64,
    start_time: DateTime<Utc>,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            total_crawled: AtomicU64::new(0),
            total_failed: AtomicU64::new(0),
            total_scraped: AtomicU64::new(0),
            start_time: Utc::now(),
        }
    }

    pub fn incr_total_crawled(&self) {
        self.total_crawled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_total_failed(&self) {
        self.total_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_total_scraped(&self, value: u64) {
        self.total_scraped.fetch_add(value, Ordering::Relaxed);
    }

    pub fn total_crawled(&self) -> u64 {
        self.total_crawled.load(Ordering::Relaxed)
    }

    pub fn total_failed(&self) -> u64 {
        self.total_failed.load(Ordering::Relaxed)
    }

    pub fn total_scraped(&self) -> u64 {
        self.total_scraped.load(Ordering::Relaxed)
    }

    /// Elapsed time since the crawl started in seconds
    pub fn elapsed_time(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }

    pub fn report(&self) {
        log::info!(
            "{} pages crawled, {} failed, {} items scraped in {}s",
            self.total_crawled(),
            self.total_failed(),
            self.total_scraped(),
            self.elapsed_time(),
        );
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}
