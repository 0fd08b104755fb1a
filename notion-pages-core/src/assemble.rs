//! High-level page rendering: fetch → transform → template.
//!
//! [`PageAssembler`] drives one page at a time:
//!   - resolves the title (with a placeholder for untitled pages) and the cover,
//!   - fetches the root blocks and walks them depth-first, fetching children on demand,
//!   - groups list items with one [`ListAccumulator`] per sibling sequence,
//!   - merges the body into the `page` template, and that into the `layout` template.
//!
//! # Error Handling
//! Any failure (an unknown block kind, a failed child fetch, a template error) aborts the
//! whole page. A page with silently missing content is never returned.
//!
//! # Concurrency
//! Children are fetched strictly one at a time and fully rendered before the next
//! sibling is looked at. Renders of different pages share no state.

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info, warn};

use crate::contract::{ContentSource, TemplateRenderer, TemplateValues};
use crate::error::RenderError;
use crate::list::ListAccumulator;
use crate::markup::{element, escape_text, void_element, Attributes};
use crate::model::{Block, Page, PageId};
use crate::rich_text::{format_runs, plain_text};
use crate::transform::transform;

pub const PAGE_TEMPLATE: &str = "page";
pub const LAYOUT_TEMPLATE: &str = "layout";

const UNTITLED_PREFIX: &str = "Untitled-";
const COVER_CONTAINER_CLASS: &str = "relative";
const COVER_IMAGE_CLASS: &str = "w-full h-64 object-cover";
const COVER_TITLE_CLASS: &str = "absolute bottom-4 left-4 text-h1 text-white";

/// Output of a page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub markup: String,
}

pub struct PageAssembler<S, T> {
    source: S,
    templates: T,
    stylesheet: String,
}

impl<S, T> PageAssembler<S, T>
where
    S: ContentSource,
    T: TemplateRenderer,
{
    pub fn new(source: S, templates: T) -> Self {
        Self {
            source,
            templates,
            stylesheet: String::new(),
        }
    }

    /// CSS inlined into the layout's `css` placeholder.
    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn templates(&self) -> &T {
        &self.templates
    }

    /// Fetches the page metadata, then renders it.
    pub async fn render_page_by_id(&self, page_id: &PageId) -> Result<RenderedPage, RenderError> {
        let page = self
            .source
            .fetch_page(page_id)
            .await
            .map_err(|source| RenderError::PageFetchFailed {
                page_id: page_id.clone(),
                source,
            })?;
        self.render_page(&page).await
    }

    pub async fn render_page(&self, page: &Page) -> Result<RenderedPage, RenderError> {
        let title = extract_title(page);
        info!(page_id = %page.id, title = %title, "Rendering page");

        let body = self.render_body(&page.id).await?;
        let cover = extract_cover(page, &title);

        let page_values = TemplateValues::from([
            ("content", body),
            ("cover", cover),
            ("title", escape_text(&title)),
        ]);
        let page_markup = self.templates.render(PAGE_TEMPLATE, &page_values)?;

        let layout_values = TemplateValues::from([
            ("title", escape_text(&title)),
            ("content", page_markup),
            ("css", self.stylesheet.clone()),
        ]);
        let markup = self.templates.render(LAYOUT_TEMPLATE, &layout_values)?;

        info!(page_id = %page.id, bytes = markup.len(), "Rendered page");
        Ok(RenderedPage { title, markup })
    }

    /// Renders the root blocks of a page, without any template.
    pub async fn render_body(&self, page_id: &PageId) -> Result<String, RenderError> {
        let blocks = self
            .source
            .fetch_root_blocks(page_id)
            .await
            .map_err(|source| RenderError::RootFetchFailed {
                page_id: page_id.clone(),
                source,
            })?;
        debug!(page_id = %page_id, blocks = blocks.len(), "Fetched root blocks");
        self.render_blocks(&blocks).await
    }

    /// Renders one sibling sequence with its own list accumulator, recursing into
    /// children depth-first.
    fn render_blocks<'a>(&'a self, blocks: &'a [Block]) -> BoxFuture<'a, Result<String, RenderError>> {
        async move {
            let mut markup = String::new();
            let mut lists = ListAccumulator::new();
            let last = blocks.len().saturating_sub(1);

            for (index, block) in blocks.iter().enumerate() {
                // A block that cannot render fails here, before its children are fetched.
                let standalone = match block.kind.as_list_item() {
                    Some((_, text)) => {
                        format_runs(&text.rich_text)?;
                        String::new()
                    }
                    None => transform(block, None)?,
                };

                let children = if block.has_children {
                    debug!(block_id = %block.id, kind = block.kind.tag(), "Fetching block children");
                    let nested = self.source.fetch_children(&block.id).await.map_err(|source| {
                        RenderError::ChildFetchFailed {
                            block_id: block.id.clone(),
                            source,
                        }
                    })?;
                    Some(self.render_blocks(&nested).await?)
                } else {
                    None
                };

                let emission = lists.offer(block, children.as_deref(), index == last)?;
                markup.push_str(&emission.flushed);
                if emission.consumed_as_list_item {
                    continue;
                }

                let rendered = match children.as_deref() {
                    Some(child_markup) if block.kind.accepts_children() => {
                        transform(block, Some(child_markup))?
                    }
                    Some(_) => {
                        warn!(
                            block_id = %block.id,
                            kind = block.kind.tag(),
                            "Block kind has no place for children; nested content is not rendered"
                        );
                        standalone
                    }
                    None => standalone,
                };
                markup.push_str(&rendered);
            }

            Ok(markup)
        }
        .boxed()
    }
}

/// Plain text of the title runs, or `Untitled-<unix millis>` when that is empty.
///
/// A title of only whitespace counts as empty and also gets the placeholder.
pub fn extract_title(page: &Page) -> String {
    let title = plain_text(&page.title);
    if title.trim().is_empty() {
        return format!("{UNTITLED_PREFIX}{}", chrono::Utc::now().timestamp_millis());
    }
    title
}

/// Cover image with the title overlaid, or empty markup for pages without a cover.
pub fn extract_cover(page: &Page, title: &str) -> String {
    let Some(cover) = &page.cover else {
        return String::new();
    };
    let image = void_element(
        "img",
        &Attributes::new()
            .class(COVER_IMAGE_CLASS)
            .set("src", cover.url())
            .set("alt", title),
    );
    let heading = element(
        "h1",
        &Attributes::new().class(COVER_TITLE_CLASS),
        &escape_text(title),
    );
    element(
        "div",
        &Attributes::new().class(COVER_CONTAINER_CLASS),
        &format!("{image}{heading}"),
    )
}
