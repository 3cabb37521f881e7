//! Wire types and errors for the remote emoji service.
//!
//! The service exposes two JSON-over-HTTP endpoints: `POST {base}/send_image`
//! for submitting a drawing and `POST {base}/history_all` for paging through
//! prior submissions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level success marker in service responses.
pub const STATUS_OK: &str = "ok";

/// Timestamp format used by the service ("yyyy-MM-dd HH:mm:ss").
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors from talking to the service.
///
/// None of these are fatal; every variant carries a message suitable for
/// direct display, and callers keep their prior state on failure.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The configured base URL is not usable. Rejected before any request.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
    /// Connectivity or timeout failure. Retryable.
    #[error("network error: {0}")]
    Transport(String),
    /// Non-200 HTTP status, with the raw response body as detail.
    #[error("server error (status {status}): {body}")]
    Server { status: u16, body: String },
    /// HTTP 200 but the response `status` field was not `"ok"`.
    #[error("service reported an error: {0}")]
    Application(String),
    /// The response body was not the expected JSON shape.
    #[error("could not parse response: {0}")]
    Decode(String),
}

/// Request body for `POST {base}/send_image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub user_name: String,
    /// Inline image payload, base64-encoded (optionally a data URI).
    pub image_base64: String,
    pub prompt: String,
}

/// Success response from `send_image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// The emoji annotation for the submitted image.
    pub emoji: String,
    /// Server-assigned id of the new history entry.
    pub history_id: i64,
    pub status: String,
}

impl SubmitResponse {
    /// Check the application-level status marker.
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Request body for `POST {base}/history_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// Starting position in the remote collection.
    pub offset: usize,
    /// Maximum number of entries to return.
    pub limit: usize,
}

/// One past submission, immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Server-assigned unique id; display key and list-merge key.
    pub history_id: i64,
    /// Inline image payload, base64-encoded (optionally a data URI).
    pub image_base64: String,
    /// The emoji annotation.
    pub emoji: String,
    /// Timestamp in [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Owning user.
    pub user_name: String,
}

impl HistoryEntry {
    /// Parse the entry timestamp, or `None` if it does not match the
    /// service format.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Success response from `history_all`: one page of the remote collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPage {
    pub status: String,
    /// Server-reported size of the whole collection.
    pub total: usize,
    /// Entries for this page, in the server's display order.
    pub history: Vec<HistoryEntry>,
}

impl HistoryPage {
    /// Check the application-level status marker.
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Strip an optional `data:<mime>;base64,` marker from an inline image
/// payload, returning the bare base64 text.
pub fn strip_data_uri_prefix(payload: &str) -> &str {
    if payload.starts_with("data:") {
        if let Some(pos) = payload.find(";base64,") {
            return &payload[pos + ";base64,".len()..];
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_wire_fields() {
        let req = SubmitRequest {
            user_name: "user123".to_string(),
            image_base64: "aGk=".to_string(),
            prompt: "emoji".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"user_name\""));
        assert!(json.contains("\"image_base64\""));
        assert!(json.contains("\"prompt\""));
    }

    #[test]
    fn test_submit_response_deserialize() {
        let json = r#"{"emoji":"🐱","history_id":7,"status":"ok"}"#;
        let resp: SubmitResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.emoji, "🐱");
        assert_eq!(resp.history_id, 7);
        assert!(resp.is_ok());
    }

    #[test]
    fn test_history_page_deserialize() {
        let json = r#"{
            "status": "ok",
            "total": 45,
            "history": [{
                "history_id": 3,
                "image_base64": "data:image/png;base64,aGk=",
                "emoji": "🔥",
                "timestamp": "2025-06-07 12:34:56",
                "user_name": "user123"
            }]
        }"#;
        let page: HistoryPage = serde_json::from_str(json).unwrap();
        assert!(page.is_ok());
        assert_eq!(page.total, 45);
        assert_eq!(page.history.len(), 1);
        assert_eq!(page.history[0].history_id, 3);
    }

    #[test]
    fn test_timestamp_parsing() {
        let entry = HistoryEntry {
            history_id: 1,
            image_base64: String::new(),
            emoji: String::new(),
            timestamp: "2025-06-07 12:34:56".to_string(),
            user_name: String::new(),
        };
        let parsed = entry.parsed_timestamp().unwrap();
        assert_eq!(parsed.format(TIMESTAMP_FORMAT).to_string(), entry.timestamp);

        let bad = HistoryEntry {
            timestamp: "07/06/2025".to_string(),
            ..entry
        };
        assert!(bad.parsed_timestamp().is_none());
    }

    #[test]
    fn test_strip_data_uri_prefix() {
        assert_eq!(strip_data_uri_prefix("data:image/png;base64,aGk="), "aGk=");
        assert_eq!(strip_data_uri_prefix("data:image/jpeg;base64,YWJj"), "YWJj");
        assert_eq!(strip_data_uri_prefix("aGk="), "aGk=");
        // "data:" without a base64 marker is left alone
        assert_eq!(strip_data_uri_prefix("data:stuff"), "data:stuff");
    }

    #[test]
    fn test_api_error_messages() {
        let err = ApiError::Server {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "server error (status 503): overloaded");
    }
}
