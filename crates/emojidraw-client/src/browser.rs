//! Async driver for the history feed.

use crate::api::HistoryApi;
use emojidraw_core::history::{FeedEvent, HistoryFeed};

/// Drives a [`HistoryFeed`] against a transport.
///
/// Each operation runs one begin/complete cycle on the feed. `&mut self`
/// plus the feed's state guard give the single-in-flight discipline: a
/// begin that is rejected (already loading, nothing more to load, or in
/// error) returns `false` without issuing a request.
pub struct HistoryBrowser<A: HistoryApi> {
    api: A,
    feed: HistoryFeed,
}

impl<A: HistoryApi> HistoryBrowser<A> {
    /// Create a browser over the given transport with an empty feed.
    pub fn new(api: A) -> Self {
        Self {
            api,
            feed: HistoryFeed::new(),
        }
    }

    /// Fetch the first page, replacing the collection. Also the retry path
    /// after an error. Returns `false` when a request is already in flight.
    pub async fn refresh(&mut self) -> bool {
        let Some(request) = self.feed.begin_refresh() else {
            log::debug!("refresh rejected: request already in flight");
            return false;
        };
        let result = self.api.fetch_page(&request).await;
        self.feed.complete_refresh(result);
        true
    }

    /// Fetch the next page and append it. Returns `false` when rejected:
    /// busy, collection complete, or the feed is in the error state (the
    /// only recovery is [`refresh`](Self::refresh)).
    pub async fn load_more(&mut self) -> bool {
        let Some(request) = self.feed.begin_load_more() else {
            return false;
        };
        let result = self.api.fetch_page(&request).await;
        self.feed.complete_load_more(result);
        true
    }

    /// The underlying feed state.
    pub fn feed(&self) -> &HistoryFeed {
        &self.feed
    }

    /// Drain pending feed change notifications.
    pub fn poll_events(&mut self) -> Vec<FeedEvent> {
        self.feed.poll_events()
    }
}
