//! Error types shared by the renderer, the content source and publishing.
//!
//! Every variant is fatal for the page being rendered: nothing here is retried or
//! downgraded. Retry policy, if any, belongs to the content source implementation.

use std::path::PathBuf;

use crate::model::{BlockId, PageId};

/// Failure reported by a [`crate::contract::ContentSource`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request may succeed if repeated later (timeouts, rate limits, 5xx).
    #[error("transient content source failure: {0}")]
    Transient(String),
    #[error("content source failure: {0}")]
    Fatal(String),
}

impl SourceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SourceError::Transient(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template `{0}` not found")]
    NotFound(String),
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render template `{name}`: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown block kind: {0}")]
    UnknownBlockKind(String),
    #[error("unsupported rich text kind: {0}")]
    UnsupportedRunKind(String),
    #[error("unknown color: {0}")]
    UnknownColorKind(String),
    #[error("callout icon type is undefined")]
    UndefinedIconKind,
    #[error("not an embeddable video url: {0}")]
    InvalidMediaUrl(String),
    #[error("failed to fetch children of block {block_id}: {source}")]
    ChildFetchFailed {
        block_id: BlockId,
        #[source]
        source: SourceError,
    },
    #[error("failed to fetch blocks of page {page_id}: {source}")]
    RootFetchFailed {
        page_id: PageId,
        #[source]
        source: SourceError,
    },
    #[error("failed to fetch page {page_id}: {source}")]
    PageFetchFailed {
        page_id: PageId,
        #[source]
        source: SourceError,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
