//! # notion: HTTP content source backed by the Notion API
//!
//! [`NotionClient`] implements [`ContentSource`] over the public REST API:
//!   - `GET /pages/{id}` for page metadata (title property and cover),
//!   - `GET /blocks/{id}/children` for block lists, following `next_cursor` until the
//!     listing is exhausted. The root blocks of a page are the children of the page id.
//!
//! ## Errors
//! Connection failures, timeouts, `429` and `5xx` responses are reported as
//! [`SourceError::Transient`]; everything else (auth, not found, undecodable bodies) as
//! [`SourceError::Fatal`]. The client does not retry.
//!
//! ## Configuration
//! - `NOTION_TOKEN`: integration token, read by [`NotionClient::new_from_env`].
//! - The base URL can be overridden with [`NotionClient::with_base_url`] (proxies, tests).

mod wire;

pub use wire::{decode_block, decode_page};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::contract::ContentSource;
use crate::error::SourceError;
use crate::model::{Block, BlockId, Page, PageId};

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";
pub const TOKEN_ENV: &str = "NOTION_TOKEN";

/// Maximum page size accepted by the block children endpoint.
const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            token: token.into(),
        }
    }

    /// Reads the integration token from `NOTION_TOKEN`.
    pub fn new_from_env() -> Result<Self, SourceError> {
        match std::env::var(TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => {
                info!("Initialized NotionClient from environment");
                Ok(Self::new(token))
            }
            _ => {
                error!(env = TOKEN_ENV, "Notion token missing in environment");
                Err(SourceError::Fatal(format!("{TOKEN_ENV} is not set")))
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, url = %url, "Failed to reach Notion API");
                if e.is_timeout() || e.is_connect() {
                    SourceError::Transient(format!("request to {url} failed: {e}"))
                } else {
                    SourceError::Fatal(format!("request to {url} failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            error!(status = %status, url = %url, "Notion API returned error. Response body: {body}");
            let message = format!("{url} returned {status}: {body}");
            return Err(
                if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    SourceError::Transient(message)
                } else {
                    SourceError::Fatal(message)
                },
            );
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = ?e, url = %url, "Failed to parse Notion API response");
            SourceError::Fatal(format!("undecodable response from {url}: {e}"))
        })
    }

    async fn list_children(&self, parent_id: &str) -> Result<Vec<Block>, SourceError> {
        let url = format!("{}/blocks/{}/children", self.base_url, parent_id);
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![("page_size", PAGE_SIZE.to_string())];
            if let Some(start) = &cursor {
                query.push(("start_cursor", start.clone()));
            }

            let listing: wire::BlockList = self.get_json(&url, &query).await?;
            for value in listing.results {
                let block = decode_block(value).map_err(|e| {
                    error!(error = ?e, parent_id, "Failed to decode Notion block");
                    SourceError::Fatal(format!("undecodable block under {parent_id}: {e}"))
                })?;
                blocks.push(block);
            }

            match (listing.has_more, listing.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        debug!(parent_id, count = blocks.len(), "Fetched block children");
        Ok(blocks)
    }
}

#[async_trait]
impl ContentSource for NotionClient {
    async fn fetch_page(&self, page_id: &PageId) -> Result<Page, SourceError> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        info!(page_id = %page_id, "Fetching Notion page");
        let value: serde_json::Value = self.get_json(&url, &[]).await?;
        decode_page(value).map_err(|e| {
            error!(error = ?e, page_id = %page_id, "Failed to decode Notion page");
            SourceError::Fatal(format!("undecodable page {page_id}: {e}"))
        })
    }

    async fn fetch_root_blocks(&self, page_id: &PageId) -> Result<Vec<Block>, SourceError> {
        self.list_children(page_id.as_str()).await
    }

    async fn fetch_children(&self, block_id: &BlockId) -> Result<Vec<Block>, SourceError> {
        self.list_children(block_id.as_str()).await
    }
}
