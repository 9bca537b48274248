//! Webdam REST client built on `reqwest`.
//!
//! Provides [`HttpWebdamClient`], which implements [`WebdamClient`] against
//! the Webdam v2 API. Folder contents are paged; 429 and 5xx responses are
//! retried with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::{RemoteError, WebdamClient};
use crate::model::{
    lenient_u64, Asset, AssetId, AssetSummary, FolderId, FolderListing, FolderMetadata,
};

/// Connection settings for the Webdam API (`[webdam]` in the config file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebdamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Pre-issued OAuth bearer token. Obtaining it is outside this crate.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Number of assets requested per folder listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries for 429/5xx and connection failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,
}

impl Default for WebdamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_ms: default_retry_base_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://apiv2.webdamdb.com".to_string()
}

fn default_page_size() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_ms() -> u64 {
    500
}

const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// One page of `GET /folders/{id}/assets`.
#[derive(Debug, Deserialize)]
struct AssetPage {
    #[serde(default, deserialize_with = "lenient_u64")]
    total_count: Option<u64>,
    #[serde(default)]
    folders: Vec<FolderMetadata>,
    #[serde(default)]
    items: Vec<AssetSummary>,
}

/// HTTP implementation of [`WebdamClient`].
pub struct HttpWebdamClient {
    config: WebdamConfig,
    base: Url,
    client: reqwest::Client,
}

impl HttpWebdamClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// [`RemoteError::Transport`] if the base URL is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(config: WebdamConfig) -> Result<Self, RemoteError> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            RemoteError::Transport(format!("invalid base url {}: {e}", config.base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(RemoteError::Transport(format!(
                "invalid base url {}",
                config.base_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self {
            config,
            base,
            client,
        })
    }

    /// Returns the connection configuration.
    pub fn config(&self) -> &WebdamConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        build_url(&self.base, segments, query)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, RemoteError> {
        let mut attempt: u32 = 0;
        loop {
            let mut request = self.client.get(url.clone());
            if let Some(token) = &self.config.access_token {
                request = request.bearer_auth(token);
            }
            debug!(%url, attempt, "webdam request");

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) if (e.is_timeout() || e.is_connect()) && attempt < self.config.max_retries => {
                    let delay = backoff_delay(attempt, self.config.retry_base_ms);
                    warn!(%url, error = %e, ?delay, "webdam request failed, retrying");
                    attempt += 1;
                    tokio::time::sleep(delay).await;
                    continue;
                }
                Err(e) => return Err(RemoteError::Transport(e.to_string())),
            };

            let status = response.status();
            if status.is_success() {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| RemoteError::Transport(e.to_string()))?;
                return decode(&body);
            }

            if is_retryable_status(status) && attempt < self.config.max_retries {
                let delay = retry_after(&response)
                    .unwrap_or_else(|| backoff_delay(attempt, self.config.retry_base_ms));
                warn!(%url, %status, ?delay, "webdam request throttled, retrying");
                attempt += 1;
                tokio::time::sleep(delay).await;
                continue;
            }

            let message = response.text().await.unwrap_or_default();
            return Err(status_error(status, what, &message));
        }
    }
}

#[async_trait]
impl WebdamClient for HttpWebdamClient {
    async fn get_folder(&self, id: FolderId) -> Result<FolderMetadata, RemoteError> {
        let url = self.endpoint(&["folders", &id.to_string()], &[]);
        self.get_json(url, &format!("folder {id}")).await
    }

    async fn get_folder_assets(&self, id: FolderId) -> Result<FolderListing, RemoteError> {
        let id_segment = id.to_string();
        let what = format!("folder {id}");
        let limit = self.config.page_size.max(1);
        let mut listing = FolderListing::default();
        let mut offset = 0usize;
        let mut first = true;

        loop {
            let url = self.endpoint(
                &["folders", &id_segment, "assets"],
                &[
                    ("sortby", "filename".to_string()),
                    ("sortdir", "asc".to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            );
            let page: AssetPage = self.get_json(url, &what).await?;
            if first {
                listing.folders = page.folders;
                first = false;
            }
            let page_len = page.items.len();
            listing.items.extend(page.items);

            match next_offset(listing.items.len(), page_len, page.total_count, limit) {
                Some(next) => offset = next,
                None => break,
            }
        }

        debug!(
            folder = %id,
            folders = listing.folders.len(),
            items = listing.items.len(),
            "folder listing fetched"
        );
        Ok(listing)
    }

    async fn get_top_level_folders(&self) -> Result<Vec<FolderMetadata>, RemoteError> {
        let url = self.endpoint(&["folders", &FolderId::ROOT.to_string()], &[]);
        self.get_json(url, "top-level folders").await
    }

    async fn get_asset(&self, id: AssetId) -> Result<Asset, RemoteError> {
        let url = self.endpoint(&["assets", &id.to_string()], &[]);
        self.get_json(url, &format!("asset {id}")).await
    }

    async fn get_asset_multiple(&self, ids: &[AssetId]) -> Result<Vec<Asset>, RemoteError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut fetched = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(self.config.page_size.max(1)) {
            let url = self.endpoint(&["assets", "list"], &[("ids", join_ids(chunk))]);
            let assets: Vec<Asset> = self.get_json(url, "asset list").await?;
            fetched.extend(assets);
        }

        Ok(order_by_request(ids, fetched))
    }
}

fn build_url(base: &Url, segments: &[&str], query: &[(&str, String)]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    url
}

fn join_ids(ids: &[AssetId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Reorders `fetched` to follow `requested`. Ids the service did not return
/// are dropped.
fn order_by_request(requested: &[AssetId], mut fetched: Vec<Asset>) -> Vec<Asset> {
    let mut ordered = Vec::with_capacity(requested.len());
    for id in requested {
        match fetched.iter().position(|asset| asset.id == *id) {
            Some(pos) => ordered.push(fetched.swap_remove(pos)),
            None => debug!(asset = %id, "asset missing from list response"),
        }
    }
    ordered
}

/// Offset of the next page to request, or `None` when the listing is complete.
fn next_offset(
    collected: usize,
    page_len: usize,
    total: Option<u64>,
    limit: usize,
) -> Option<usize> {
    if page_len == 0 {
        return None;
    }
    match total {
        Some(total) if collected as u64 >= total => None,
        Some(_) => Some(collected),
        None if page_len < limit => None,
        None => Some(collected),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RemoteError> {
    serde_json::from_slice(body).map_err(|e| RemoteError::Decode(e.to_string()))
}

fn status_error(status: StatusCode, what: &str, body: &str) -> RemoteError {
    let message = summarize_body(status, body);
    match status {
        StatusCode::NOT_FOUND => RemoteError::NotFound(what.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized(message),
        _ => RemoteError::Http {
            status: status.as_u16(),
            message,
        },
    }
}

fn summarize_body(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string();
    }
    trimmed.chars().take(200).collect()
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn retry_after(response: &Response) -> Option<Duration> {
    let value = response.headers().get(RETRY_AFTER)?.to_str().ok()?;
    let secs = value.trim().parse::<u64>().ok()?;
    Some(Duration::from_secs(secs).min(MAX_RETRY_DELAY))
}

fn backoff_delay(attempt: u32, base_ms: u64) -> Duration {
    let exp = base_ms.saturating_mul(1u64 << attempt.min(16));
    let capped = Duration::from_millis(exp).min(MAX_RETRY_DELAY);
    let jitter = capped.mul_f64(rand::random::<f64>() * 0.2);
    capped + jitter
}
