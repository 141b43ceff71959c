//! Integration tests for the Fileglass service and browsing client.
//!
//! ## Test Modules
//!
//! - **api_tests**: listing, content and action endpoints through the router
//! - **health_api_tests**: banner, health, metrics and version endpoints
//! - **config_tests**: configuration defaults, layering and validation
//! - **error_tests**: error rendering and validation helpers
//! - **session_tests**: the browser session against a scripted listing service
//! - **http_client_tests**: the HTTP client against a live router
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test api_tests
//! cargo test session_tests
//! # etc.
//! ```

pub mod error_tests;
pub mod health_api_tests;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::{AppConfig, FoldersConfig};
use crate::host::HostActions;
use crate::state::AppState;

/// A home directory with the three browsable folders created under `root`.
pub(crate) fn test_config(root: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    let folder = |name: &str| {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        dir.display().to_string()
    };
    config.folders = FoldersConfig {
        desktop: folder("Desktop"),
        documents: folder("Documents"),
        downloads: folder("Downloads"),
    };
    config
}

pub(crate) fn write_file(dir: &Path, name: &str, size: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![b'x'; size]).unwrap();
    path
}

/// Host that records calls instead of launching apps. `trash` removes the file
/// so follow-up listings see the effect.
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub opened: Mutex<Vec<PathBuf>>,
    pub trashed: Mutex<Vec<PathBuf>>,
    pub fail: bool,
}

impl RecordingHost {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }
}

impl HostActions for RecordingHost {
    fn open(&self, path: &Path) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::other("no default application"));
        }
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn trash(&self, path: &Path) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "trash unavailable"));
        }
        fs::remove_file(path)?;
        self.trashed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub(crate) fn test_state(config: AppConfig, host: Arc<RecordingHost>) -> AppState {
    AppState::with_host(config, host)
}
