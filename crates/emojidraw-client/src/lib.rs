//! EmojiDraw Client Library
//!
//! Async HTTP client for the remote emoji service and the driver that feeds
//! pages into the history state machine.

mod api;
mod browser;

pub use api::{EmojiApi, HistoryApi};
pub use browser::HistoryBrowser;
