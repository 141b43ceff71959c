use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters of the listing service
#[derive(Clone)]
pub struct Metrics {
    pub pages_served: Arc<AtomicUsize>,
    pub records_served: Arc<AtomicU64>,
    pub folder_scans: Arc<AtomicUsize>,
    pub scan_cache_hits: Arc<AtomicUsize>,
    pub files_read: Arc<AtomicUsize>,
    pub files_opened: Arc<AtomicUsize>,
    pub files_trashed: Arc<AtomicUsize>,
    pub action_failures: Arc<AtomicUsize>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            pages_served: Arc::new(AtomicUsize::new(0)),
            records_served: Arc::new(AtomicU64::new(0)),
            folder_scans: Arc::new(AtomicUsize::new(0)),
            scan_cache_hits: Arc::new(AtomicUsize::new(0)),
            files_read: Arc::new(AtomicUsize::new(0)),
            files_opened: Arc::new(AtomicUsize::new(0)),
            files_trashed: Arc::new(AtomicUsize::new(0)),
            action_failures: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn record_page(&self, records: usize, cache_hit: bool) {
        self.pages_served.fetch_add(1, Ordering::Relaxed);
        self.records_served.fetch_add(records as u64, Ordering::Relaxed);
        if cache_hit {
            self.scan_cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.folder_scans.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn inc_files_read(&self) {
        self.files_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_files_opened(&self) {
        self.files_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_files_trashed(&self) {
        self.files_trashed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_action_failures(&self) {
        self.action_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pages_served: self.pages_served.load(Ordering::Relaxed),
            records_served: self.records_served.load(Ordering::Relaxed),
            folder_scans: self.folder_scans.load(Ordering::Relaxed),
            scan_cache_hits: self.scan_cache_hits.load(Ordering::Relaxed),
            files_read: self.files_read.load(Ordering::Relaxed),
            files_opened: self.files_opened.load(Ordering::Relaxed),
            files_trashed: self.files_trashed.load(Ordering::Relaxed),
            action_failures: self.action_failures.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub pages_served: usize,
    pub records_served: u64,
    pub folder_scans: usize,
    pub scan_cache_hits: usize,
    pub files_read: usize,
    pub files_opened: usize,
    pub files_trashed: usize,
    pub action_failures: usize,
    pub uptime_seconds: u64,
}
