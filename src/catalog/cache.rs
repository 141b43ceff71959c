use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::Mutex;

use super::{scan_folder, ScanOptions};
use crate::error::AppResult;
use crate::types::FileRecord;

struct CachedScan {
    taken_at: Instant,
    records: Arc<Vec<FileRecord>>,
}

/// Reuses a folder scan across consecutive page requests for a short time.
///
/// Paging through a folder issues one request per page; without the cache every
/// page would walk the whole folder again.
#[derive(Clone)]
pub struct ScanCache {
    entries: Arc<Mutex<LruCache<PathBuf, CachedScan>>>,
    ttl: Duration,
    options: Arc<ScanOptions>,
}

impl ScanCache {
    pub fn new(capacity: usize, ttl: Duration, options: ScanOptions) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: Arc::new(Mutex::new(LruCache::new(capacity))), ttl, options: Arc::new(options) }
    }

    /// Returns the records under `root`, scanning on a blocking thread when the
    /// cached scan is missing or older than the TTL. Returns `(records, cache_hit)`.
    pub async fn records(&self, root: &Path) -> AppResult<(Arc<Vec<FileRecord>>, bool)> {
        if !self.ttl.is_zero() {
            let mut entries = self.entries.lock().await;
            if let Some(cached) = entries.get(root) {
                if cached.taken_at.elapsed() < self.ttl {
                    return Ok((cached.records.clone(), true));
                }
            }
        }

        let started = Instant::now();
        let options = self.options.clone();
        let scan_root = root.to_path_buf();
        let records = tokio::task::spawn_blocking(move || scan_folder(&scan_root, &options)).await??;
        tracing::debug!(
            root = %root.display(),
            files = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "folder scanned"
        );
        let records = Arc::new(records);

        if !self.ttl.is_zero() {
            self.entries
                .lock()
                .await
                .put(root.to_path_buf(), CachedScan { taken_at: Instant::now(), records: records.clone() });
        }
        Ok((records, false))
    }

    /// Drops every cached scan whose root contains `path`. Roots are compared
    /// both as configured and canonicalized.
    pub async fn invalidate_containing(&self, path: &Path) {
        let mut entries = self.entries.lock().await;
        let stale: Vec<PathBuf> = entries
            .iter()
            .map(|(root, _)| root.clone())
            .filter(|root| path.starts_with(root) || root.canonicalize().is_ok_and(|c| path.starts_with(c)))
            .collect();
        for root in stale {
            entries.pop(&root);
        }
    }
}
