//! Paginated history feed state machine.
//!
//! Presents a remote-owned collection as a single growing local list with a
//! has-more flag, safe to drive from "scrolled near the end" events. The
//! feed itself does no I/O: callers obtain the next page request from a
//! `begin_*` method, perform the fetch, and hand the outcome back through
//! the matching `complete_*` method. The next offset is always the current
//! collection length, so the collection is never de-duplicated or re-sorted.

use crate::api::{ApiError, HistoryEntry, HistoryPage, HistoryRequest};

/// Fixed page size for history requests.
pub const PAGE_SIZE: usize = 20;

/// Feed lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// First page (or a full refresh) in flight.
    LoadingInitial,
    /// A follow-up page in flight.
    LoadingMore,
    /// At least one page loaded, no request in flight.
    Loaded,
    /// Last request failed; already-loaded entries are retained.
    Error,
}

/// Change notifications, drained via [`HistoryFeed::poll_events`].
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// The collection was replaced by a fresh first page.
    Refreshed { count: usize, total: usize },
    /// A page was appended to the collection.
    Appended { count: usize, total: usize },
    /// A request failed; prior entries are untouched.
    Failed { message: String },
}

/// Growing local view of the remote history collection.
#[derive(Debug, Default)]
pub struct HistoryFeed {
    state: FeedState,
    entries: Vec<HistoryEntry>,
    total: usize,
    error: Option<String>,
    events: Vec<FeedEvent>,
}

impl HistoryFeed {
    /// Create an idle, empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a full refresh: the page-0 request.
    ///
    /// Allowed from `Idle`, `Loaded` and `Error` (retry); returns `None`
    /// without any state change while a request is already in flight.
    pub fn begin_refresh(&mut self) -> Option<HistoryRequest> {
        match self.state {
            FeedState::LoadingInitial | FeedState::LoadingMore => None,
            _ => {
                self.state = FeedState::LoadingInitial;
                Some(HistoryRequest {
                    offset: 0,
                    limit: PAGE_SIZE,
                })
            }
        }
    }

    /// Start fetching the next page, at `offset = len(entries)`.
    ///
    /// Only allowed from `Loaded` while more entries remain; `None`
    /// otherwise (complete, busy, or in error — recovery is a refresh).
    pub fn begin_load_more(&mut self) -> Option<HistoryRequest> {
        if self.state != FeedState::Loaded || !self.has_more() {
            return None;
        }
        self.state = FeedState::LoadingMore;
        Some(HistoryRequest {
            offset: self.entries.len(),
            limit: PAGE_SIZE,
        })
    }

    /// Apply the outcome of a refresh request.
    ///
    /// Success replaces the whole collection with the page contents and
    /// takes the server-reported total; failure leaves the previous
    /// collection untouched and records the error message.
    pub fn complete_refresh(&mut self, result: Result<HistoryPage, ApiError>) {
        if self.state != FeedState::LoadingInitial {
            log::warn!("complete_refresh in state {:?}; ignoring", self.state);
            return;
        }
        match result {
            Ok(page) => {
                self.entries = page.history;
                self.total = page.total;
                self.error = None;
                self.state = FeedState::Loaded;
                self.events.push(FeedEvent::Refreshed {
                    count: self.entries.len(),
                    total: self.total,
                });
            }
            Err(err) => self.fail(err),
        }
    }

    /// Apply the outcome of a load-more request.
    ///
    /// Success appends the page to the tail in arrival order and refreshes
    /// the total; failure retains everything already loaded.
    pub fn complete_load_more(&mut self, result: Result<HistoryPage, ApiError>) {
        if self.state != FeedState::LoadingMore {
            log::warn!("complete_load_more in state {:?}; ignoring", self.state);
            return;
        }
        match result {
            Ok(page) => {
                let count = page.history.len();
                self.entries.extend(page.history);
                self.total = page.total;
                self.error = None;
                self.state = FeedState::Loaded;
                self.events.push(FeedEvent::Appended {
                    count,
                    total: self.total,
                });
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: ApiError) {
        let message = err.to_string();
        log::warn!("history request failed: {}", message);
        self.error = Some(message.clone());
        self.state = FeedState::Error;
        self.events.push(FeedEvent::Failed { message });
    }

    /// Drain pending change notifications.
    pub fn poll_events(&mut self) -> Vec<FeedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the remote collection has entries beyond what is loaded.
    pub fn has_more(&self) -> bool {
        self.entries.len() < self.total
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FeedState {
        self.state
    }

    /// Check if a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            FeedState::LoadingInitial | FeedState::LoadingMore
        )
    }

    /// Loaded entries in arrival order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Server-reported total collection size.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Message from the last failed request, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
