//! # transform: block to markup
//!
//! [`transform`] dispatches on the block kind and produces the markup of a single
//! block. It never fetches anything: children are rendered by the caller (see
//! [`crate::assemble`]) and passed in as `child_markup`, which container kinds splice
//! into their content area and all other kinds ignore.
//!
//! List items are not rendered here. They belong to the sibling-level
//! [`crate::list::ListAccumulator`], which calls [`render_list_item`]; `transform`
//! returns empty markup for them so a caller can never render one twice.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::RenderError;
use crate::markup::{element, escape_text, plain_element, void_element, Attributes};
use crate::model::{
    Block, BlockKind, CalloutBlock, HeadingBlock, Icon, MediaBlock, MediaSource, RichText,
    TextBlock, ToDoBlock,
};
use crate::rich_text::format_runs;

const BLOCKQUOTE_CLASS: &str = "border-l-2 ps-2 p-1";
const LIST_ITEM_CLASS: &str = "max-w-full break-words mt-0";
const CHECKBOX_CONTAINER_CLASS: &str = "flex gap-2 items-center";
const CHECKBOX_CLASS: &str =
    "size-3.5 appearance-none border-2 checked:border-none checked:bg-checkIcon checked:bg-blue-700";
const IMAGE_CLASS: &str = "max-w-xl object-cover";
const VIDEO_CLASS: &str = "aspect-video w-full max-w-xl";
const CALLOUT_CONTAINER_CLASS: &str = "flex gap-2 p-2 rounded-md bg-neutral-700";
const CALLOUT_ICON_CLASS: &str = "size-5";

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
const IFRAME_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/(watch\?v=|embed/|v/)?([A-Za-z0-9_-]{11})",
        )
        .expect("youtube url pattern is valid")
    })
}

/// Renders one block. `child_markup` is the already rendered markup of its children.
pub fn transform(block: &Block, child_markup: Option<&str>) -> Result<String, RenderError> {
    match &block.kind {
        BlockKind::Paragraph(text) => paragraph(text),
        BlockKind::Heading(heading) => self::heading(heading, child_markup),
        BlockKind::BulletedListItem(_) | BlockKind::NumberedListItem(_) => Ok(String::new()),
        BlockKind::Quote(text) => quote(text),
        BlockKind::Divider => Ok(void_element("hr", &Attributes::new())),
        BlockKind::ToDo(todo) => to_do(todo),
        BlockKind::Image(image) => self::image(image),
        BlockKind::Video(video) => self::video(video),
        BlockKind::Callout(callout) => self::callout(callout),
        BlockKind::Unsupported(tag) => Err(RenderError::UnknownBlockKind(tag.clone())),
    }
}

/// Renders the `<li>` of a list item, with its nested children after the text.
pub fn render_list_item(text: &TextBlock, child_markup: Option<&str>) -> Result<String, RenderError> {
    let mut contents = format_runs(&text.rich_text)?;
    if let Some(children) = child_markup {
        contents.push_str(children);
    }
    Ok(element(
        "li",
        &Attributes::new().class(LIST_ITEM_CLASS),
        &contents,
    ))
}

/// Turns a YouTube watch, short or embed URL into its embed URL.
pub fn youtube_embed_url(url: &str) -> Result<String, RenderError> {
    let video_id = youtube_pattern()
        .captures(url)
        .and_then(|captures| captures.get(5))
        .ok_or_else(|| RenderError::InvalidMediaUrl(url.to_string()))?;
    Ok(format!("{YOUTUBE_EMBED_BASE}{}", video_id.as_str()))
}

fn paragraph(text: &TextBlock) -> Result<String, RenderError> {
    let contents = format_runs(&text.rich_text)?;
    if contents.is_empty() {
        return Ok(String::new());
    }
    Ok(plain_element("p", &contents))
}

fn heading(heading: &HeadingBlock, child_markup: Option<&str>) -> Result<String, RenderError> {
    let contents = format_runs(&heading.rich_text)?;
    let tag = heading.level.tag();

    if heading.is_toggleable {
        let summary_text = element(
            "span",
            &Attributes::new().class(&format!("text-{tag} break-words")),
            &contents,
        );
        let summary = plain_element("summary", &summary_text);
        let body = plain_element("div", child_markup.unwrap_or_default());
        return Ok(plain_element("details", &format!("{summary}{body}")));
    }

    Ok(element(
        tag,
        &Attributes::new().class(&format!("text-{tag}")),
        &contents,
    ))
}

fn quote(text: &TextBlock) -> Result<String, RenderError> {
    let contents = format_runs(&text.rich_text)?;
    Ok(element(
        "blockquote",
        &Attributes::new().class(BLOCKQUOTE_CLASS),
        &contents,
    ))
}

fn to_do(todo: &ToDoBlock) -> Result<String, RenderError> {
    let mut checkbox = Attributes::new()
        .class(CHECKBOX_CLASS)
        .set("type", "checkbox")
        .flag("disabled");
    let mut text = format_runs(&todo.rich_text)?;
    if todo.checked {
        checkbox = checkbox.flag("checked");
        text = plain_element("del", &text);
    }

    let contents = format!(
        "{}{}",
        void_element("input", &checkbox),
        plain_element("span", &text)
    );
    Ok(element(
        "div",
        &Attributes::new().class(CHECKBOX_CONTAINER_CLASS),
        &contents,
    ))
}

fn caption(runs: &[RichText]) -> Result<String, RenderError> {
    let contents = format_runs(runs)?;
    if contents.is_empty() {
        return Ok(String::new());
    }
    Ok(plain_element("p", &contents))
}

fn image(image: &MediaBlock) -> Result<String, RenderError> {
    let img = void_element(
        "img",
        &Attributes::new()
            .class(IMAGE_CLASS)
            .set("src", image.source.url()),
    );
    let caption = caption(&image.caption)?;
    Ok(plain_element("div", &format!("{img}{caption}")))
}

fn video(video: &MediaBlock) -> Result<String, RenderError> {
    let player = match &video.source {
        MediaSource::External(url) => {
            let embed_url = youtube_embed_url(url)?;
            let attributes = Attributes::new()
                .class(VIDEO_CLASS)
                .set("src", &embed_url)
                .set("title", "YouTube video player")
                .set("allow", IFRAME_ALLOW)
                .flag("allowfullscreen");
            element("iframe", &attributes, "")
        }
        MediaSource::Hosted(url) => {
            let source = void_element("source", &Attributes::new().set("src", url));
            element(
                "video",
                &Attributes::new().class(VIDEO_CLASS).flag("controls"),
                &source,
            )
        }
    };
    let caption = caption(&video.caption)?;
    Ok(plain_element("div", &format!("{player}{caption}")))
}

fn callout(callout: &CalloutBlock) -> Result<String, RenderError> {
    let icon = match &callout.icon {
        Some(Icon::External(url)) | Some(Icon::Hosted(url)) => void_element(
            "img",
            &Attributes::new().class(CALLOUT_ICON_CLASS).set("src", url),
        ),
        Some(Icon::Emoji(emoji)) => element(
            "span",
            &Attributes::new().class(CALLOUT_ICON_CLASS),
            &escape_text(emoji),
        ),
        Some(Icon::Unrecognized(_)) | None => return Err(RenderError::UndefinedIconKind),
    };
    let text = plain_element("p", &format_runs(&callout.rich_text)?);
    Ok(element(
        "div",
        &Attributes::new().class(CALLOUT_CONTAINER_CLASS),
        &format!("{icon}{text}"),
    ))
}
