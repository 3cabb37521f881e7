//! EmojiDraw Core Library
//!
//! Platform-agnostic core data structures and logic for the EmojiDraw
//! drawing and submission pipeline.

pub mod api;
pub mod canvas;
pub mod history;
pub mod settings;
pub mod stroke;

pub use api::{
    ApiError, HistoryEntry, HistoryPage, HistoryRequest, SubmitRequest, SubmitResponse, STATUS_OK,
};
pub use canvas::DrawingCanvas;
pub use history::{FeedEvent, FeedState, HistoryFeed, PAGE_SIZE};
pub use settings::{AppSettings, SettingsError, SettingsStore, DEFAULT_BASE_URL};
pub use stroke::{Stroke, StrokeId};
