//! # contract: interfaces to the collaborators of the renderer
//!
//! The renderer talks to the outside world through three traits:
//!
//! - [`ContentSource`]: fetches pages and block lists (the Notion API in production,
//!   see [`crate::notion::NotionClient`]).
//! - [`TemplateRenderer`]: substitutes named placeholders into page and layout templates
//!   (see [`crate::template::MiniJinjaTemplates`]).
//! - [`Publisher`]: persists rendered pages and the site index
//!   (see [`crate::site::DirectoryPublisher`]).
//!
//! ## Mocking & Testing
//! - Each trait is annotated for `mockall`, so tests can script fetches and assert on
//!   published output without network or filesystem access.
//! - The mocks are exported under the `test-export-mocks` feature (on by default).
//!
//! Implementations are constructed explicitly and passed in; nothing here is global.

use std::collections::BTreeMap;

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::{PublishError, SourceError, TemplateError};
use crate::model::{Block, BlockId, Page, PageId};

/// Named values substituted into a template.
pub type TemplateValues = BTreeMap<&'static str, String>;

/// Read access to the hosted workspace.
///
/// Errors distinguish transient from fatal failures; callers surface them as-is.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Page metadata only: id, title and cover. No body.
    async fn fetch_page(&self, page_id: &PageId) -> Result<Page, SourceError>;

    /// The top-level blocks of a page, in document order.
    async fn fetch_root_blocks(&self, page_id: &PageId) -> Result<Vec<Block>, SourceError>;

    /// The nested blocks of a block whose `has_children` is set.
    async fn fetch_children(&self, block_id: &BlockId) -> Result<Vec<Block>, SourceError>;
}

/// Pure placeholder substitution. Templates contain no logic.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str, values: &TemplateValues) -> Result<String, TemplateError>;
}

/// A rendered page ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPage {
    pub title: String,
    /// File name derived from the title, unique within one publish run.
    pub filename: String,
    pub markup: String,
}

/// Destination of a publish run.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Called once before the first page of a run is published.
    async fn prepare(&self) -> Result<(), PublishError>;

    async fn publish_page(&self, page: &PublishedPage) -> Result<(), PublishError>;

    /// Publishes the site index listing every page of the run.
    async fn publish_index(&self, markup: &str) -> Result<(), PublishError>;
}
