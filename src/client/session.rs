use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::browser::{Browser, BrowserCommand, BrowserEvent, BrowserSnapshot, Notice};
use super::reconcile::ParamChange;
use super::remote::ListingService;
use super::scroll::SentinelHandle;
use crate::types::{CategoryFilter, Folder, QueryParameters, SortKey, SubCategory};

/// Runs a [`Browser`] against a [`ListingService`].
///
/// All events go through one queue and are applied by a single task, so the
/// browser state has exactly one writer. Service calls run on their own tasks
/// and report back through the same queue.
struct Session {
    browser: Browser,
    service: Arc<dyn ListingService>,
    events: mpsc::UnboundedSender<BrowserEvent>,
    notices: mpsc::UnboundedSender<Notice>,
    snapshots: watch::Sender<BrowserSnapshot>,
    cancel: CancellationToken,
}

impl Session {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<BrowserEvent>) {
        self.step(BrowserEvent::Refresh);
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                Some(event) = inbox.recv() => self.step(event),
                else => break,
            }
        }
        tracing::debug!("browser session stopped");
    }

    fn step(&mut self, event: BrowserEvent) {
        for command in self.browser.handle(event) {
            self.dispatch(command);
        }
        for notice in self.browser.take_notices() {
            let _ = self.notices.send(notice);
        }
        self.snapshots.send_replace(self.snapshot());
    }

    fn snapshot(&self) -> BrowserSnapshot {
        let mut snapshot = self.browser.snapshot();
        snapshot.preview_url = snapshot
            .preview
            .as_ref()
            .filter(|p| p.kind.is_streamed())
            .map(|p| self.service.content_url(&p.target.path));
        snapshot
    }

    fn dispatch(&self, command: BrowserCommand) {
        let service = self.service.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match command {
                BrowserCommand::FetchPage { ticket, request } => {
                    BrowserEvent::PageLoaded { ticket, result: service.fetch_page(&request).await }
                }
                BrowserCommand::ReadContent { path } => {
                    let result = service.read_content(&path).await;
                    BrowserEvent::PreviewLoaded { path, result }
                }
                BrowserCommand::Open { path } => {
                    let result = service.open(&path).await;
                    BrowserEvent::OpenFinished { path, result }
                }
                BrowserCommand::Delete { path } => {
                    let result = service.delete(&path).await;
                    BrowserEvent::DeleteFinished { path, result }
                }
            };
            // The session may be gone already
            let _ = events.send(event);
        });
    }
}

/// Front end of a running session: sends events, observes snapshots.
pub struct SessionHandle {
    events: mpsc::UnboundedSender<BrowserEvent>,
    snapshots: watch::Receiver<BrowserSnapshot>,
    notices: mpsc::UnboundedReceiver<Notice>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    // Dropping the handle stops the session
    _stop_on_drop: DropGuard,
}

/// Starts a session on the current runtime. The initial load is issued
/// immediately with `query`.
pub fn spawn(service: Arc<dyn ListingService>, query: QueryParameters, page_limit: usize) -> SessionHandle {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (notices_tx, notices_rx) = mpsc::unbounded_channel();
    let browser = Browser::new(query, page_limit);
    let (snapshots_tx, snapshots_rx) = watch::channel(browser.snapshot());
    let cancel = CancellationToken::new();

    let session = Session {
        browser,
        service,
        events: events_tx.clone(),
        notices: notices_tx,
        snapshots: snapshots_tx,
        cancel: cancel.clone(),
    };
    let task = tokio::spawn(session.run(events_rx));

    SessionHandle {
        events: events_tx,
        snapshots: snapshots_rx,
        notices: notices_rx,
        _stop_on_drop: cancel.clone().drop_guard(),
        cancel,
        task,
    }
}

impl SessionHandle {
    /// Queues an event. Returns `false` once the session has stopped.
    pub fn send(&self, event: BrowserEvent) -> bool {
        self.events.send(event).is_ok()
    }

    pub fn set_folder(&self, folder: Folder) -> bool {
        self.send(BrowserEvent::Change(ParamChange::Folder(folder)))
    }

    pub fn set_sort(&self, sort_by: SortKey) -> bool {
        self.send(BrowserEvent::Change(ParamChange::SortBy(sort_by)))
    }

    pub fn set_category(&self, category: CategoryFilter) -> bool {
        self.send(BrowserEvent::Change(ParamChange::Category(category)))
    }

    pub fn set_sub_category(&self, sub_category: SubCategory) -> bool {
        self.send(BrowserEvent::Change(ParamChange::SubCategory(sub_category)))
    }

    pub fn set_search(&self, search: impl Into<String>) -> bool {
        self.send(BrowserEvent::Change(ParamChange::Search(search.into())))
    }

    pub fn refresh(&self) -> bool {
        self.send(BrowserEvent::Refresh)
    }

    pub fn preview(&self, path: impl Into<String>) -> bool {
        self.send(BrowserEvent::PreviewRequested(path.into()))
    }

    pub fn close_preview(&self) -> bool {
        self.send(BrowserEvent::PreviewClosed)
    }

    pub fn open(&self, path: impl Into<String>) -> bool {
        self.send(BrowserEvent::OpenRequested(path.into()))
    }

    /// Deletes a file. Confirmation is the caller's job.
    pub fn delete(&self, path: impl Into<String>) -> bool {
        self.send(BrowserEvent::DeleteRequested(path.into()))
    }

    pub fn sentinel(&self) -> SentinelHandle {
        SentinelHandle::new(self.events.clone())
    }

    pub fn snapshot(&self) -> BrowserSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BrowserSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until a snapshot satisfies `pred`. `None` if the session stopped first.
    pub async fn wait_for(&self, pred: impl FnMut(&BrowserSnapshot) -> bool) -> Option<BrowserSnapshot> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx.wait_for(pred).await.ok()?;
        Some(snapshot.clone())
    }

    pub async fn next_notice(&mut self) -> Option<Notice> {
        self.notices.recv().await
    }

    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!("browser session task failed: {}", e);
        }
    }
}
