//! # rich_text: inline run formatting
//!
//! Renders a single [`RichText`] run to a markup fragment. Style elements are nested
//! in a fixed order so output is deterministic when several flags are set:
//!
//! ```text
//! <span|code|a class="…"><b><i><u><del>text</del></u></i></b></span|code|a>
//! ```
//!
//! `code` does not add a nested element: it swaps the generic `<span>` container for
//! `<code>`. A link wraps everything in an anchor, which then carries the color class.

use crate::error::RenderError;
use crate::markup::{element, escape_text, plain_element, Attributes};
use crate::model::{Color, RichText, RunKind};

const LINK_CLASS: &str = "underline";

/// Formats one run. Empty text yields empty markup, which callers treat as absent.
pub fn format_run(run: &RichText) -> Result<String, RenderError> {
    if let RunKind::Unsupported(kind) = &run.kind {
        return Err(RenderError::UnsupportedRunKind(kind.clone()));
    }

    let text = escape_text(&run.text);
    if text.is_empty() {
        return Ok(String::new());
    }

    let annotations = &run.annotations;
    let color = color_class(&annotations.color)?;

    // Innermost first, so bold ends up outermost.
    let styles = [
        (annotations.strikethrough, "del"),
        (annotations.underline, "u"),
        (annotations.italic, "i"),
        (annotations.bold, "b"),
    ];
    let mut content = text;
    for (enabled, tag) in styles {
        if enabled {
            content = plain_element(tag, &content);
        }
    }

    match &run.link_url {
        Some(url) => {
            if annotations.code {
                content = plain_element("code", &content);
            }
            let class = match &color {
                Some(color) => format!("{LINK_CLASS} {color}"),
                None => LINK_CLASS.to_string(),
            };
            let attributes = Attributes::new().class(&class).set("href", url);
            Ok(element("a", &attributes, &content))
        }
        None => {
            let tag = if annotations.code { "code" } else { "span" };
            let attributes = match &color {
                Some(color) => Attributes::new().class(color),
                None => Attributes::new(),
            };
            Ok(element(tag, &attributes, &content))
        }
    }
}

/// Formats and concatenates a run sequence, skipping empty runs.
pub fn format_runs(runs: &[RichText]) -> Result<String, RenderError> {
    runs.iter().map(format_run).collect()
}

/// Concatenated unstyled text of a run sequence.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

/// Maps a color annotation to its class. `default` has no class.
pub fn color_class(color: &Color) -> Result<Option<String>, RenderError> {
    match color {
        Color::Default => Ok(None),
        Color::Foreground(color) => Ok(Some(format!("text-{}-600", color.as_str()))),
        Color::Background(color) => Ok(Some(format!("bg-{}-100", color.as_str()))),
        Color::Unrecognized(value) => Err(RenderError::UnknownColorKind(value.clone())),
    }
}
