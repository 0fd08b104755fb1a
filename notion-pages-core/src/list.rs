//! # list: grouping consecutive list items
//!
//! Notion has no list block, only individual list items. A [`ListAccumulator`]
//! buffers the rendered `<li>` of consecutive list items of one sibling sequence and
//! emits them wrapped in `<ul>`/`<ol>` once the run ends, either because a non-list
//! sibling arrives or because the offered block is the last sibling.
//!
//! One accumulator belongs to exactly one sibling sequence. Rendering a block's
//! children starts a new accumulator; a group never spans recursion levels.

use crate::error::RenderError;
use crate::markup::{element, Attributes};
use crate::model::{Block, ListKind};
use crate::transform::render_list_item;

const ORDERED_LIST_CLASS: &str = "list-decimal pl-4";
const UNORDERED_LIST_CLASS: &str = "list-disc pl-4";

/// Outcome of offering one block to the accumulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emission {
    /// A completed group, or empty. Callers append it before anything else.
    pub flushed: String,
    /// The block was buffered as a list item and must not be rendered again.
    pub consumed_as_list_item: bool,
}

#[derive(Debug, Default)]
pub struct ListAccumulator {
    items: Vec<String>,
    kind: Option<ListKind>,
}

impl ListAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a group is currently open.
    pub fn is_open(&self) -> bool {
        !self.items.is_empty()
    }

    /// Discriminator of the open group, fixed by its first item.
    pub fn kind(&self) -> Option<ListKind> {
        self.kind
    }

    /// Offers the next sibling. `child_markup` is the rendered children of a list item
    /// and is ignored for other kinds.
    pub fn offer(
        &mut self,
        block: &Block,
        child_markup: Option<&str>,
        is_last: bool,
    ) -> Result<Emission, RenderError> {
        let Some((kind, text)) = block.kind.as_list_item() else {
            return Ok(Emission {
                flushed: self.flush(),
                consumed_as_list_item: false,
            });
        };

        let item = render_list_item(text, child_markup)?;
        // A numbered item after a bulleted one stays in the bulleted group.
        self.kind.get_or_insert(kind);
        self.items.push(item);

        let flushed = if is_last { self.flush() } else { String::new() };
        Ok(Emission {
            flushed,
            consumed_as_list_item: true,
        })
    }

    fn flush(&mut self) -> String {
        let items = std::mem::take(&mut self.items);
        let Some(kind) = self.kind.take() else {
            return String::new();
        };
        if items.is_empty() {
            return String::new();
        }

        let (tag, class) = match kind {
            ListKind::Ordered => ("ol", ORDERED_LIST_CLASS),
            ListKind::Unordered => ("ul", UNORDERED_LIST_CLASS),
        };
        tracing::trace!(tag, items = items.len(), "Flushing list group");
        element(tag, &Attributes::new().class(class), &items.concat())
    }
}
