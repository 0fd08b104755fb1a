//! Site publishing: render every configured page, then publish pages and the index.
//!
//! [`publish_site`] renders all pages before touching the publisher, so a failing page
//! leaves the previously published site untouched. Filenames are derived from page
//! titles and made unique within the run.
//!
//! [`DirectoryPublisher`] writes the result to a local directory:
//!
//! ```text
//! {output_dir}/index.html
//! {output_dir}/posts/{filename}
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::assemble::PageAssembler;
use crate::contract::{ContentSource, PublishedPage, Publisher, TemplateRenderer, TemplateValues};
use crate::error::PublishError;
use crate::markup::{element, escape_text, plain_element, Attributes};
use crate::model::PageId;

pub const INDEX_TEMPLATE: &str = "index";
pub const INDEX_FILENAME: &str = "index.html";
pub const POSTS_DIR: &str = "posts";

/// What a publish run produced, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub pages: Vec<PublishedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEntry {
    pub page_id: PageId,
    pub title: String,
    pub filename: String,
}

/// Renders `page_ids` in order and publishes them with a site index.
pub async fn publish_site<S, T, P>(
    assembler: &PageAssembler<S, T>,
    page_ids: &[PageId],
    publisher: &P,
    site_title: &str,
) -> Result<PublishReport, PublishError>
where
    S: ContentSource,
    T: TemplateRenderer,
    P: Publisher,
{
    info!(pages = page_ids.len(), "[PUBLISH] Starting site publish");

    let mut taken = HashSet::new();
    let mut rendered = Vec::with_capacity(page_ids.len());
    for page_id in page_ids {
        let page = assembler.render_page_by_id(page_id).await.map_err(|e| {
            error!(page_id = %page_id, error = %e, "[PUBLISH][ERROR] Page render failed");
            e
        })?;
        let filename = unique_filename(&page.title, &mut taken);
        debug!(page_id = %page_id, filename = %filename, "[PUBLISH] Page rendered");
        rendered.push((
            page_id.clone(),
            PublishedPage {
                title: page.title,
                filename,
                markup: page.markup,
            },
        ));
    }

    publisher.prepare().await?;

    let mut report = PublishReport::default();
    let mut links = String::new();
    for (page_id, page) in rendered {
        publisher.publish_page(&page).await?;
        info!(filename = %page.filename, "[PUBLISH] Published page");

        let href = format!("{POSTS_DIR}/{}", page.filename);
        let link = element(
            "a",
            &Attributes::new().set("href", &href),
            &escape_text(&page.title),
        );
        links.push_str(&plain_element("li", &link));

        report.pages.push(PublishedEntry {
            page_id,
            title: page.title,
            filename: page.filename,
        });
    }

    let index_values = TemplateValues::from([
        ("site_title", escape_text(site_title)),
        ("content", links),
    ]);
    let index = assembler.templates().render(INDEX_TEMPLATE, &index_values)?;
    publisher.publish_index(&index).await?;
    info!(pages = report.pages.len(), "[PUBLISH] Site publish complete");

    Ok(report)
}

/// Derives a file-system safe `.html` file name from a page title.
pub fn filename_for_title(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '#' | '%' => '_',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .collect();
    let stem = stem.trim_matches(|c: char| c == '_' || c == '.' || c == '-');
    let stem = if stem.is_empty() { "untitled" } else { stem };
    format!("{stem}.html")
}

fn unique_filename(title: &str, taken: &mut HashSet<String>) -> String {
    let base = filename_for_title(title);
    let mut candidate = base.clone();
    let mut counter = 2;
    while !taken.insert(candidate.clone()) {
        let stem = base.trim_end_matches(".html");
        candidate = format!("{stem}-{counter}.html");
        counter += 1;
    }
    candidate
}

/// Writes pages into a local output directory (e.g. a GitHub Pages checkout).
#[derive(Debug, Clone)]
pub struct DirectoryPublisher {
    output_dir: PathBuf,
}

impl DirectoryPublisher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    async fn write(&self, path: PathBuf, contents: &str) -> Result<(), PublishError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| PublishError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| PublishError::Io {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }
}

#[async_trait]
impl Publisher for DirectoryPublisher {
    /// Empties the output directory, keeping `.git`, and creates it if missing.
    async fn prepare(&self) -> Result<(), PublishError> {
        let io_error = |source: std::io::Error| PublishError::Io {
            path: self.output_dir.clone(),
            source,
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(io_error)?;
        let mut entries = tokio::fs::read_dir(&self.output_dir)
            .await
            .map_err(io_error)?;
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            if entry.file_name() == ".git" {
                continue;
            }
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(io_error)?;
            let removed = if file_type.is_dir() {
                tokio::fs::remove_dir_all(&path).await
            } else {
                tokio::fs::remove_file(&path).await
            };
            removed.map_err(|source| PublishError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "Removed stale output");
        }
        info!(output_dir = %self.output_dir.display(), "Prepared output directory");
        Ok(())
    }

    async fn publish_page(&self, page: &PublishedPage) -> Result<(), PublishError> {
        let path = self.output_dir.join(POSTS_DIR).join(&page.filename);
        self.write(path, &page.markup).await
    }

    async fn publish_index(&self, markup: &str) -> Result<(), PublishError> {
        self.write(self.output_dir.join(INDEX_FILENAME), markup).await
    }
}
