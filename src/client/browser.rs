//! The browser's transition function.
//!
//! [`Browser`] owns the reconciler, the pagination and the scroll trigger and
//! reacts to one [`BrowserEvent`] at a time. It never performs I/O: whatever
//! needs the listing service comes back as a [`BrowserCommand`], and the
//! outcome is fed in again as another event. This keeps every transition
//! deterministic and testable without a renderer or a network.

use super::filter::{self, ViewSummary};
use super::pagination::{FetchTicket, LoadState, PageOutcome, PageWindow, Pagination};
use super::preview::Preview;
use super::reconcile::{ParamChange, Reconciler, Reconciliation, ViewParameters};
use super::remote::{FetchedContent, PageRequest};
use super::scroll::ScrollTrigger;
use crate::error::ClientError;
use crate::types::{FileRecord, QueryParameters};

#[derive(Debug)]
pub enum BrowserEvent {
    Change(ParamChange),
    /// Manual refresh: hard reset with the current parameters.
    Refresh,
    SentinelVisibility(bool),
    PageLoaded { ticket: FetchTicket, result: Result<Vec<FileRecord>, ClientError> },
    PreviewRequested(String),
    PreviewLoaded { path: String, result: Result<FetchedContent, ClientError> },
    PreviewClosed,
    OpenRequested(String),
    OpenFinished { path: String, result: Result<(), ClientError> },
    /// The user already confirmed the delete.
    DeleteRequested(String),
    DeleteFinished { path: String, result: Result<(), ClientError> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCommand {
    FetchPage { ticket: FetchTicket, request: PageRequest },
    ReadContent { path: String },
    Open { path: String },
    Delete { path: String },
}

/// Failures the user has to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DeleteFailed { path: String, message: String },
    OpenFailed { path: String, message: String },
}

/// Everything a renderer needs after an event.
#[derive(Debug, Clone)]
pub struct BrowserSnapshot {
    pub query: QueryParameters,
    pub view: ViewParameters,
    pub state: LoadState,
    pub window: PageWindow,
    pub loaded: usize,
    pub visible: Vec<FileRecord>,
    pub extensions: Vec<String>,
    pub summary: ViewSummary,
    pub preview: Option<Preview>,
    /// Stream URL for media previews; filled in by the session.
    pub preview_url: Option<String>,
}

#[derive(Debug)]
pub struct Browser {
    reconciler: Reconciler,
    pagination: Pagination,
    scroll: ScrollTrigger,
    preview: Option<Preview>,
    notices: Vec<Notice>,
}

impl Browser {
    pub fn new(query: QueryParameters, page_limit: usize) -> Self {
        Self {
            reconciler: Reconciler::new(query),
            pagination: Pagination::new(page_limit),
            scroll: ScrollTrigger::default(),
            preview: None,
            notices: Vec::new(),
        }
    }

    pub fn query(&self) -> QueryParameters {
        self.reconciler.query()
    }

    pub fn view(&self) -> &ViewParameters {
        self.reconciler.view()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn handle(&mut self, event: BrowserEvent) -> Vec<BrowserCommand> {
        match event {
            BrowserEvent::Change(change) => match self.reconciler.apply(change) {
                Reconciliation::HardReset => self.hard_reset(),
                Reconciliation::ViewOnly | Reconciliation::Unchanged => Vec::new(),
            },
            BrowserEvent::Refresh => self.hard_reset(),
            BrowserEvent::SentinelVisibility(visible) => {
                if self.scroll.observe(visible, self.pagination.can_load_more()) {
                    self.load_more()
                } else {
                    Vec::new()
                }
            }
            BrowserEvent::PageLoaded { ticket, result } => match self.pagination.apply(ticket, result) {
                PageOutcome::Shifted => self.load_more(),
                PageOutcome::Applied { .. } | PageOutcome::Stale | PageOutcome::Failed => Vec::new(),
            },
            BrowserEvent::PreviewRequested(path) => self.open_preview(&path),
            BrowserEvent::PreviewLoaded { path, result } => {
                match self.preview.as_mut() {
                    Some(preview) if preview.target.path == path => preview.complete(result),
                    _ => tracing::debug!(%path, "preview content arrived after close"),
                }
                Vec::new()
            }
            BrowserEvent::PreviewClosed => {
                self.preview = None;
                Vec::new()
            }
            BrowserEvent::OpenRequested(path) => vec![BrowserCommand::Open { path }],
            BrowserEvent::OpenFinished { path, result } => {
                if let Err(e) = result {
                    tracing::warn!(%path, error = %e, "open failed");
                    self.notices.push(Notice::OpenFailed { path, message: e.to_string() });
                }
                Vec::new()
            }
            BrowserEvent::DeleteRequested(path) => vec![BrowserCommand::Delete { path }],
            BrowserEvent::DeleteFinished { path, result } => {
                match result {
                    Ok(()) => {
                        self.pagination.remove(&path);
                        if self.preview.as_ref().is_some_and(|p| p.target.path == path) {
                            self.preview = None;
                        }
                        tracing::info!(%path, "moved to trash");
                    }
                    Err(e) => {
                        tracing::warn!(%path, error = %e, "delete failed");
                        self.notices.push(Notice::DeleteFailed { path, message: e.to_string() });
                    }
                }
                Vec::new()
            }
        }
    }

    /// Clear, rewind, then load from offset 0.
    fn hard_reset(&mut self) -> Vec<BrowserCommand> {
        self.pagination.reset();
        self.pagination.load_initial().map(|t| self.fetch(t)).into_iter().collect()
    }

    /// Append fetch at the current offset, if the pagination allows one.
    pub fn load_more(&mut self) -> Vec<BrowserCommand> {
        self.pagination.load_more().map(|t| self.fetch(t)).into_iter().collect()
    }

    fn fetch(&self, ticket: FetchTicket) -> BrowserCommand {
        let request = PageRequest { query: self.query(), limit: ticket.limit, offset: ticket.offset };
        tracing::debug!(
            folder = %request.query.folder,
            sort_by = %request.query.sort_by,
            category = %request.query.category,
            offset = request.offset,
            generation = ticket.generation,
            "requesting page"
        );
        BrowserCommand::FetchPage { ticket, request }
    }

    fn open_preview(&mut self, path: &str) -> Vec<BrowserCommand> {
        let Some(record) = self.pagination.records().iter().find(|r| r.path == path).cloned() else {
            tracing::debug!(%path, "preview requested for a record that is not loaded");
            return Vec::new();
        };
        let (preview, needs_text) = Preview::open(record);
        self.preview = Some(preview);
        if needs_text {
            vec![BrowserCommand::ReadContent { path: path.to_string() }]
        } else {
            Vec::new()
        }
    }

    pub fn visible_records(&self) -> Vec<&FileRecord> {
        filter::filter_view(self.pagination.records(), self.view())
    }

    pub fn available_extensions(&self) -> Vec<String> {
        filter::available_extensions(self.pagination.records(), self.query().category)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn snapshot(&self) -> BrowserSnapshot {
        let visible = self.visible_records();
        BrowserSnapshot {
            query: self.query(),
            view: self.view().clone(),
            state: self.pagination.state(),
            window: self.pagination.window(),
            loaded: self.pagination.records().len(),
            summary: filter::summarize(&visible),
            visible: visible.into_iter().cloned().collect(),
            extensions: self.available_extensions(),
            preview: self.preview.clone(),
            preview_url: None,
        }
    }
}
