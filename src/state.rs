use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::cache::ScanCache;
use crate::catalog::ScanOptions;
use crate::config::AppConfig;
use crate::error::{validation, AppError, AppResult};
use crate::host::{HostActions, SystemHost};
use crate::metrics::Metrics;
use crate::types::Folder;

/// The shared state of the listing service.
///
/// Cheap to clone; handed to every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Scans reused across page requests.
    pub scans: ScanCache,
    /// Opener and trash. Tests substitute a recording fake.
    pub host: Arc<dyn HostActions>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_host(config, Arc::new(SystemHost))
    }

    pub fn with_host(config: AppConfig, host: Arc<dyn HostActions>) -> Self {
        let listing = &config.listing;
        let scans = ScanCache::new(
            listing.cache_capacity,
            Duration::from_secs(listing.cache_ttl_secs),
            ScanOptions { include_hidden: listing.include_hidden, excludes: listing.excludes.clone() },
        );
        Self { config: Arc::new(config), scans, host, metrics: Metrics::new() }
    }

    pub fn folder_root(&self, folder: Folder) -> PathBuf {
        self.config.folders.resolve(folder)
    }

    /// Resolves a client-supplied path for `/read`, `/open` and `/delete`.
    ///
    /// The path must be an existing regular file inside one of the browsable
    /// folders once symlinks and `..` components are resolved.
    pub fn authorize_path(&self, raw: &str) -> AppResult<PathBuf> {
        validation::validate_path(raw)?;
        let canonical = match Path::new(raw).canonicalize() {
            Ok(p) => p,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound("File not found".to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let inside = Folder::ALL
            .into_iter()
            .filter_map(|f| self.folder_root(f).canonicalize().ok())
            .any(|root| canonical.starts_with(root));
        if !inside {
            tracing::warn!(path = %raw, "rejected path outside browsable folders");
            return Err(AppError::Forbidden("Path is outside the browsable folders".to_string()));
        }
        // Folder roots and subdirectories are never read, opened or trashed
        if !canonical.is_file() {
            return Err(AppError::BadRequest("Path is not a regular file".to_string()));
        }
        Ok(canonical)
    }
}
