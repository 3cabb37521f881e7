//! HTTP client for the emoji service.

use async_trait::async_trait;
use emojidraw_core::api::{ApiError, HistoryPage, HistoryRequest, SubmitRequest, SubmitResponse};
use reqwest::StatusCode;
use url::Url;

/// Client for the two service endpoints.
///
/// The base URL is injected at construction and validated up front, so bad
/// configuration is rejected before any request is issued.
pub struct EmojiApi {
    http: reqwest::Client,
    base_url: String,
}

impl EmojiApi {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim();
        let parsed =
            Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
        if !parsed.has_host() {
            return Err(ApiError::InvalidUrl(format!("{}: missing host", trimmed)));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    /// The configured base URL (without a trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Submit a drawing for emoji annotation: `POST {base}/send_image`.
    ///
    /// A non-200 status is surfaced with the status code and the raw body
    /// text; a 200 with a malformed body is a decode error.
    pub async fn submit_image(&self, request: &SubmitRequest) -> Result<SubmitResponse, ApiError> {
        let url = self.endpoint("send_image");
        log::debug!("POST {} ({} bytes of payload)", url, request.image_base64.len());
        let body = self.post(&url, request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetch one page of the submission history: `POST {base}/history_all`.
    ///
    /// In addition to the HTTP status check, a response whose `status` field
    /// is not `"ok"` is an application-level error even on HTTP 200.
    pub async fn fetch_history(&self, request: &HistoryRequest) -> Result<HistoryPage, ApiError> {
        let url = self.endpoint("history_all");
        log::debug!("POST {} offset={} limit={}", url, request.offset, request.limit);
        let body = self.post(&url, request).await?;
        let page: HistoryPage =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !page.is_ok() {
            return Err(ApiError::Application(format!(
                "unexpected response status: {}",
                page.status
            )));
        }
        Ok(page)
    }

    async fn post<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<String, ApiError> {
        let response = self.http.post(url).json(body).send().await.map_err(|e| {
            log::warn!("request to {} failed: {}", url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            return Err(ApiError::Server {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

/// Transport seam for history pagination.
///
/// Lets the feed driver run against a stub in tests; [`EmojiApi`] is the
/// real implementation.
#[async_trait]
pub trait HistoryApi: Send + Sync {
    /// Fetch one page of the history collection.
    async fn fetch_page(&self, request: &HistoryRequest) -> Result<HistoryPage, ApiError>;
}

#[async_trait]
impl HistoryApi for EmojiApi {
    async fn fetch_page(&self, request: &HistoryRequest) -> Result<HistoryPage, ApiError> {
        self.fetch_history(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_urls() {
        assert!(matches!(
            EmojiApi::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            EmojiApi::new("file:///nope"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let api = EmojiApi::new("https://emoji.example.com/").unwrap();
        assert_eq!(
            api.endpoint("history_all"),
            "https://emoji.example.com/history_all"
        );

        let api = EmojiApi::new("https://emoji.example.com").unwrap();
        assert_eq!(api.endpoint("send_image"), "https://emoji.example.com/send_image");
    }
}
