use async_trait::async_trait;
use reqwest::{Response, Url};
use serde_json::Value as JsonValue;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{FileAction, FileRecord, QueryParameters};

/// One page request against `GET /scan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub query: QueryParameters,
    pub limit: usize,
    pub offset: usize,
}

/// Raw body of `GET /read`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContent {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// The remote listing service as the browser sees it.
///
/// Implementations hold no browser state; each call is a plain
/// request/response mapping.
#[async_trait]
pub trait ListingService: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<FileRecord>, ClientError>;

    async fn read_content(&self, path: &str) -> Result<FetchedContent, ClientError>;

    async fn open(&self, path: &str) -> Result<(), ClientError>;

    async fn delete(&self, path: &str) -> Result<(), ClientError>;

    /// URL a renderer can stream the file from (images, audio, video, pdf).
    fn content_url(&self, path: &str) -> String;
}

/// [`ListingService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpListingClient {
    base: Url,
    http: reqwest::Client,
}

impl HttpListingClient {
    pub fn new(base: Url) -> Self {
        Self { base, http: reqwest::Client::new() }
    }

    pub fn from_config(cfg: &ClientConfig) -> anyhow::Result<Self> {
        let base = Url::parse(&cfg.base_url)
            .map_err(|e| anyhow::anyhow!("invalid client.base_url {:?}: {}", cfg.base_url, e))?;
        Ok(Self::new(base))
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}/{}", self.base.path().trim_end_matches('/'), name);
        url.set_path(&path);
        url.set_query(None);
        url
    }

    /// Returns the body of a 2xx response, or a `ServiceError` carrying the
    /// server's message.
    async fn success_body(resp: Response) -> Result<(Option<String>, Vec<u8>), ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::ServiceError { status: status.as_u16(), message: error_message(&text) });
        }
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await.map_err(|e| ClientError::NetworkFailure(e.to_string()))?;
        Ok((content_type, body.to_vec()))
    }

    async fn post_action(&self, name: &str, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.endpoint(name))
            .json(&FileAction { path: path.to_string() })
            .send()
            .await?;
        Self::success_body(resp).await.map(|_| ())
    }
}

#[async_trait]
impl ListingService for HttpListingClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<FileRecord>, ClientError> {
        let mut url = self.endpoint("scan");
        url.query_pairs_mut()
            .append_pair("folder", request.query.folder.as_str())
            .append_pair("sort_by", request.query.sort_by.as_str())
            .append_pair("category", request.query.category.as_str())
            .append_pair("limit", &request.limit.to_string())
            .append_pair("offset", &request.offset.to_string());
        let resp = self.http.get(url).send().await?;
        let (_, body) = Self::success_body(resp).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn read_content(&self, path: &str) -> Result<FetchedContent, ClientError> {
        let resp = self.http.get(self.content_url(path)).send().await?;
        let (content_type, body) = Self::success_body(resp).await?;
        Ok(FetchedContent { content_type, body })
    }

    async fn open(&self, path: &str) -> Result<(), ClientError> {
        self.post_action("open", path).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.post_action("delete", path).await
    }

    fn content_url(&self, path: &str) -> String {
        let mut url = self.endpoint("read");
        url.query_pairs_mut().append_pair("path", path);
        url.to_string()
    }
}

/// Pulls a readable message out of an error body: our own
/// `{"error":{"message"}}`, a `{"detail"}` body, or the raw text.
fn error_message(text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<JsonValue>(text) {
        if let Some(msg) = v.pointer("/error/message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = v.get("detail").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "HTTP error".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
