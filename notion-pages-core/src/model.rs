//! # model: the block tree as the renderer sees it
//!
//! These types describe the subset of Notion content that can be turned into markup:
//! blocks, rich-text runs and page metadata. They are plain data; decoding from the
//! Notion wire format lives in [`crate::notion`], rendering in [`crate::transform`].
//!
//! Kinds outside the modelled vocabulary are preserved as [`BlockKind::Unsupported`],
//! [`RunKind::Unsupported`], [`Color::Unrecognized`] and [`Icon::Unrecognized`] so the
//! renderer can fail loudly on them instead of dropping content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a block, only used to fetch its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a page. A page is also the parent block of its root blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One content node of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// True when nested blocks exist; they must be fetched separately.
    pub has_children: bool,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: BlockId::new(id),
            has_children: false,
            kind,
        }
    }

    /// Marks the block as having nested blocks to fetch.
    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextBlock),
    Heading(HeadingBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    Quote(TextBlock),
    Divider,
    ToDo(ToDoBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    Callout(CalloutBlock),
    /// Any block type the renderer has no markup for, carrying the raw type tag.
    Unsupported(String),
}

impl BlockKind {
    /// The Notion type tag of this kind.
    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Paragraph(_) => "paragraph",
            BlockKind::Heading(heading) => match heading.level {
                HeadingLevel::H1 => "heading_1",
                HeadingLevel::H2 => "heading_2",
                HeadingLevel::H3 => "heading_3",
            },
            BlockKind::BulletedListItem(_) => "bulleted_list_item",
            BlockKind::NumberedListItem(_) => "numbered_list_item",
            BlockKind::Quote(_) => "quote",
            BlockKind::Divider => "divider",
            BlockKind::ToDo(_) => "to_do",
            BlockKind::Image(_) => "image",
            BlockKind::Video(_) => "video",
            BlockKind::Callout(_) => "callout",
            BlockKind::Unsupported(tag) => tag,
        }
    }

    /// Returns the list discriminator and text of list-item kinds.
    pub fn as_list_item(&self) -> Option<(ListKind, &TextBlock)> {
        match self {
            BlockKind::BulletedListItem(text) => Some((ListKind::Unordered, text)),
            BlockKind::NumberedListItem(text) => Some((ListKind::Ordered, text)),
            _ => None,
        }
    }

    /// Whether rendered children have a place in this kind's markup.
    pub fn accepts_children(&self) -> bool {
        match self {
            BlockKind::Heading(heading) => heading.is_toggleable,
            BlockKind::BulletedListItem(_) | BlockKind::NumberedListItem(_) => true,
            _ => false,
        }
    }
}

/// Discriminator of a list group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    pub rich_text: Vec<RichText>,
}

impl From<Vec<RichText>> for TextBlock {
    fn from(rich_text: Vec<RichText>) -> Self {
        Self { rich_text }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Element name, also used in the `text-hN` class.
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingBlock {
    pub level: HeadingLevel,
    pub rich_text: Vec<RichText>,
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToDoBlock {
    pub rich_text: Vec<RichText>,
    pub checked: bool,
}

/// Where an image or video lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    External(String),
    /// A file hosted by Notion itself (signed, expiring URL).
    Hosted(String),
}

impl MediaSource {
    pub fn url(&self) -> &str {
        match self {
            MediaSource::External(url) | MediaSource::Hosted(url) => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock {
    pub source: MediaSource,
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    External(String),
    Hosted(String),
    Emoji(String),
    /// An icon type outside the modelled vocabulary.
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalloutBlock {
    pub rich_text: Vec<RichText>,
    pub icon: Option<Icon>,
}

/// One inline span with uniform styling. Runs are never split further.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub kind: RunKind,
    /// Raw, unescaped text. For non-text runs this is the service's plain-text rendition.
    pub text: String,
    pub annotations: Annotations,
    pub link_url: Option<String>,
}

impl RichText {
    /// An unstyled text run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: RunKind::Text,
            text: text.into(),
            annotations: Annotations::default(),
            link_url: None,
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunKind {
    Text,
    /// Mentions, equations and any other run type, by raw tag.
    Unsupported(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub color: Color,
}

/// The nine named colors, shared by foreground and background variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
}

impl NamedColor {
    pub const ALL: [NamedColor; 9] = [
        NamedColor::Gray,
        NamedColor::Brown,
        NamedColor::Orange,
        NamedColor::Yellow,
        NamedColor::Green,
        NamedColor::Blue,
        NamedColor::Purple,
        NamedColor::Pink,
        NamedColor::Red,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NamedColor::Gray => "gray",
            NamedColor::Brown => "brown",
            NamedColor::Orange => "orange",
            NamedColor::Yellow => "yellow",
            NamedColor::Green => "green",
            NamedColor::Blue => "blue",
            NamedColor::Purple => "purple",
            NamedColor::Pink => "pink",
            NamedColor::Red => "red",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.as_str() == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Default,
    Foreground(NamedColor),
    Background(NamedColor),
    /// A value outside the closed vocabulary, kept verbatim.
    Unrecognized(String),
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        if value == "default" {
            return Color::Default;
        }
        if let Some(color) = NamedColor::parse(value) {
            return Color::Foreground(color);
        }
        match value.strip_suffix("_background").and_then(NamedColor::parse) {
            Some(color) => Color::Background(color),
            None => Color::Unrecognized(value.to_string()),
        }
    }
}

/// Page metadata. The body is fetched separately through the content source.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub title: Vec<RichText>,
    pub cover: Option<MediaSource>,
}
