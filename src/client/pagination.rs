//! Offset/limit bookkeeping for a server-paginated listing.
//!
//! [`Pagination`] exclusively owns the loaded result set. Fetches are not
//! performed here: `load_initial`/`load_more` hand out a [`FetchTicket`] and the
//! caller reports the outcome through [`Pagination::apply`]. Every ticket
//! carries the generation it was issued in; `reset` bumps the generation, so a
//! response that arrives after a reset is recognised as stale and dropped.

use std::collections::HashSet;

use crate::error::ClientError;
use crate::types::FileRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded since the last reset (or the initial load failed).
    Idle,
    /// A fetch is in flight.
    Loading,
    /// At least one page is loaded and the server may have more.
    LoadedMore,
    /// The last page came back short; nothing more to load until a reset.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl PageWindow {
    fn new(limit: usize) -> Self {
        Self { offset: 0, limit, has_more: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Initial load: the response replaces the result set.
    Replace,
    /// Scroll load: the response is appended.
    Append,
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub offset: usize,
    pub limit: usize,
    pub mode: FetchMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied { received: usize },
    /// The ticket belongs to a superseded generation; nothing changed.
    Stale,
    /// The fetch failed; result set and offset are unchanged.
    Failed,
    /// A delete shifted the listing while this append was in flight. The page
    /// may or may not reflect the delete, so it is dropped and the caller
    /// refetches at the corrected offset.
    Shifted,
}

#[derive(Debug)]
pub struct Pagination {
    window: PageWindow,
    records: Vec<FileRecord>,
    paths: HashSet<String>,
    state: LoadState,
    generation: u64,
    in_flight: Option<FetchTicket>,
}

impl Pagination {
    pub fn new(limit: usize) -> Self {
        Self {
            window: PageWindow::new(limit.max(1)),
            records: Vec::new(),
            paths: HashSet::new(),
            state: LoadState::Idle,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_load_more(&self) -> bool {
        self.window.has_more && self.in_flight.is_none()
    }

    /// Drops everything loaded and starts a new generation. Any fetch still in
    /// flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.records.clear();
        self.paths.clear();
        self.window = PageWindow::new(self.window.limit);
        self.in_flight = None;
        self.state = LoadState::Idle;
    }

    /// Issues the offset-0 fetch. Only valid from `Idle`.
    pub fn load_initial(&mut self) -> Option<FetchTicket> {
        if self.state != LoadState::Idle || self.in_flight.is_some() {
            tracing::debug!(state = ?self.state, "initial load ignored");
            return None;
        }
        Some(self.issue(FetchMode::Replace, 0))
    }

    /// Issues an append fetch at the current offset, unless the listing is
    /// exhausted or a fetch is already in flight.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.can_load_more() {
            return None;
        }
        Some(self.issue(FetchMode::Append, self.window.offset))
    }

    fn issue(&mut self, mode: FetchMode, offset: usize) -> FetchTicket {
        let ticket = FetchTicket { generation: self.generation, offset, limit: self.window.limit, mode };
        self.in_flight = Some(ticket);
        self.state = LoadState::Loading;
        ticket
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<Vec<FileRecord>, ClientError>) -> PageOutcome {
        if ticket.generation != self.generation || self.in_flight != Some(ticket) {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                offset = ticket.offset,
                "discarding stale page"
            );
            return PageOutcome::Stale;
        }
        self.in_flight = None;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(offset = ticket.offset, error = %e, "listing page failed");
                self.state = self.resting_state();
                return PageOutcome::Failed;
            }
        };

        if ticket.mode == FetchMode::Append && ticket.offset != self.window.offset {
            tracing::debug!(
                issued_offset = ticket.offset,
                offset = self.window.offset,
                "listing shifted during append; page dropped"
            );
            self.state = self.resting_state();
            return PageOutcome::Shifted;
        }

        let received = page.len();
        match ticket.mode {
            FetchMode::Replace => {
                self.records.clear();
                self.paths.clear();
                self.extend_unique(page);
                self.window.offset = ticket.limit;
            }
            FetchMode::Append => {
                self.extend_unique(page);
                self.window.offset += ticket.limit;
            }
        }
        self.window.has_more = received >= ticket.limit;
        self.state = if self.window.has_more { LoadState::LoadedMore } else { LoadState::Exhausted };
        PageOutcome::Applied { received }
    }

    fn extend_unique(&mut self, page: Vec<FileRecord>) {
        for record in page {
            if self.paths.insert(record.path.clone()) {
                self.records.push(record);
            } else {
                tracing::debug!(path = %record.path, "duplicate record dropped");
            }
        }
    }

    fn resting_state(&self) -> LoadState {
        if !self.window.has_more {
            LoadState::Exhausted
        } else if self.records.is_empty() && self.window.offset == 0 {
            LoadState::Idle
        } else {
            LoadState::LoadedMore
        }
    }

    /// Removes the record at `path` after a successful delete. The server
    /// listing shrank by one, so the next page starts one record earlier. An
    /// append already in flight comes back as [`PageOutcome::Shifted`].
    pub fn remove(&mut self, path: &str) -> Option<FileRecord> {
        let idx = self.records.iter().position(|r| r.path == path)?;
        self.paths.remove(path);
        self.window.offset = self.window.offset.saturating_sub(1);
        Some(self.records.remove(idx))
    }
}
