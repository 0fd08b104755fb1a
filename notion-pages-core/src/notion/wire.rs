//! Decoding of Notion API JSON into the [`crate::model`] types.
//!
//! Only the fields the renderer needs are read. Unknown block, run, color and icon
//! types are kept (by tag) rather than rejected, so that the renderer is the one to
//! report them.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::{
    Annotations, Block, BlockId, BlockKind, CalloutBlock, Color, HeadingBlock, HeadingLevel, Icon,
    MediaBlock, MediaSource, Page, PageId, RichText, RunKind, TextBlock, ToDoBlock,
};

/// One page of a paginated block list.
#[derive(Debug, Deserialize)]
pub(crate) struct BlockList {
    pub results: Vec<Value>,
    #[serde(default)]
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    has_children: bool,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct WireText {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
}

#[derive(Debug, Deserialize)]
struct WireHeading {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
    #[serde(default)]
    is_toggleable: bool,
}

#[derive(Debug, Deserialize)]
struct WireToDo {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
    #[serde(default)]
    checked: bool,
}

/// A file object: `{"type": "external", "external": {"url": …}}` or the `file` variant.
#[derive(Debug, Deserialize)]
struct WireFile {
    #[serde(rename = "type")]
    kind: String,
    external: Option<WireUrl>,
    file: Option<WireUrl>,
}

#[derive(Debug, Deserialize)]
struct WireUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct WireMedia {
    #[serde(default)]
    caption: Vec<WireRichText>,
    #[serde(flatten)]
    file: WireFile,
}

#[derive(Debug, Deserialize)]
struct WireIcon {
    #[serde(rename = "type")]
    kind: String,
    emoji: Option<String>,
    external: Option<WireUrl>,
    file: Option<WireUrl>,
}

#[derive(Debug, Deserialize)]
struct WireCallout {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
    icon: Option<WireIcon>,
}

#[derive(Debug, Deserialize)]
struct WireRichText {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    plain_text: String,
    text: Option<WireTextContent>,
    #[serde(default)]
    annotations: WireAnnotations,
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireTextContent {
    content: String,
    link: Option<WireUrl>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WireAnnotations {
    bold: bool,
    italic: bool,
    strikethrough: bool,
    underline: bool,
    code: bool,
    color: String,
}

impl Default for WireAnnotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WirePage {
    id: String,
    cover: Option<WireFile>,
    #[serde(default)]
    properties: BTreeMap<String, WireProperty>,
}

#[derive(Debug, Deserialize)]
struct WireProperty {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: Vec<WireRichText>,
}

impl From<WireRichText> for RichText {
    fn from(run: WireRichText) -> Self {
        let annotations = Annotations {
            bold: run.annotations.bold,
            italic: run.annotations.italic,
            underline: run.annotations.underline,
            strikethrough: run.annotations.strikethrough,
            code: run.annotations.code,
            color: Color::from(run.annotations.color.as_str()),
        };

        let is_text = run.kind == "text";
        match (is_text, run.text) {
            (true, Some(text)) => RichText {
                kind: RunKind::Text,
                text: text.content,
                annotations,
                link_url: text.link.map(|link| link.url),
            },
            _ => RichText {
                kind: RunKind::Unsupported(run.kind),
                text: run.plain_text,
                annotations,
                link_url: run.href,
            },
        }
    }
}

fn runs(runs: Vec<WireRichText>) -> Vec<RichText> {
    runs.into_iter().map(RichText::from).collect()
}

fn media_source(file: WireFile) -> Result<MediaSource, serde_json::Error> {
    match (file.kind.as_str(), file.external, file.file) {
        ("external", Some(external), _) => Ok(MediaSource::External(external.url)),
        ("file", _, Some(hosted)) => Ok(MediaSource::Hosted(hosted.url)),
        (kind, _, _) => Err(serde_json::Error::custom(format!(
            "unsupported file object type `{kind}`"
        ))),
    }
}

fn icon(icon: WireIcon) -> Icon {
    match (icon.kind.as_str(), icon.emoji, icon.external, icon.file) {
        ("emoji", Some(emoji), _, _) => Icon::Emoji(emoji),
        ("external", _, Some(external), _) => Icon::External(external.url),
        ("file", _, _, Some(hosted)) => Icon::Hosted(hosted.url),
        (kind, _, _, _) => Icon::Unrecognized(kind.to_string()),
    }
}

fn text_block(payload: Value) -> Result<TextBlock, serde_json::Error> {
    let wire: WireText = serde_json::from_value(payload)?;
    Ok(TextBlock::from(runs(wire.rich_text)))
}

fn heading(level: HeadingLevel, payload: Value) -> Result<BlockKind, serde_json::Error> {
    let wire: WireHeading = serde_json::from_value(payload)?;
    Ok(BlockKind::Heading(HeadingBlock {
        level,
        rich_text: runs(wire.rich_text),
        is_toggleable: wire.is_toggleable,
    }))
}

fn media(payload: Value) -> Result<MediaBlock, serde_json::Error> {
    let wire: WireMedia = serde_json::from_value(payload)?;
    Ok(MediaBlock {
        source: media_source(wire.file)?,
        caption: runs(wire.caption),
    })
}

/// Decodes one block object from a block children listing.
pub fn decode_block(value: Value) -> Result<Block, serde_json::Error> {
    let WireBlock {
        id,
        kind,
        has_children,
        mut rest,
    } = serde_json::from_value(value)?;
    let payload = rest
        .remove(&kind)
        .unwrap_or_else(|| Value::Object(Map::new()));

    let block_kind = match kind.as_str() {
        "paragraph" => BlockKind::Paragraph(text_block(payload)?),
        "heading_1" => heading(HeadingLevel::H1, payload)?,
        "heading_2" => heading(HeadingLevel::H2, payload)?,
        "heading_3" => heading(HeadingLevel::H3, payload)?,
        "bulleted_list_item" => BlockKind::BulletedListItem(text_block(payload)?),
        "numbered_list_item" => BlockKind::NumberedListItem(text_block(payload)?),
        "quote" => BlockKind::Quote(text_block(payload)?),
        "divider" => BlockKind::Divider,
        "to_do" => {
            let wire: WireToDo = serde_json::from_value(payload)?;
            BlockKind::ToDo(ToDoBlock {
                rich_text: runs(wire.rich_text),
                checked: wire.checked,
            })
        }
        "image" => BlockKind::Image(media(payload)?),
        "video" => BlockKind::Video(media(payload)?),
        "callout" => {
            let wire: WireCallout = serde_json::from_value(payload)?;
            BlockKind::Callout(CalloutBlock {
                rich_text: runs(wire.rich_text),
                icon: wire.icon.map(icon),
            })
        }
        other => BlockKind::Unsupported(other.to_string()),
    };

    Ok(Block {
        id: BlockId::new(id),
        has_children,
        kind: block_kind,
    })
}

/// Decodes a page object. The title is the property of type `title`.
pub fn decode_page(value: Value) -> Result<Page, serde_json::Error> {
    let wire: WirePage = serde_json::from_value(value)?;
    let title = wire
        .properties
        .into_values()
        .find(|property| property.kind == "title")
        .map(|property| runs(property.title))
        .unwrap_or_default();
    let cover = wire.cover.map(media_source).transpose()?;

    Ok(Page {
        id: PageId::new(wire.id),
        title,
        cover,
    })
}
