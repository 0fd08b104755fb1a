//! Small helpers for writing HTML fragments as strings.

/// Replaces `<` and `>` with their entities. `&` is left alone, so the function is
/// idempotent: text that was already escaped passes through unchanged.
pub fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Attribute list of an element, rendered with a leading space per attribute.
#[derive(Debug, Clone, Default)]
pub struct Attributes(String);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(self, class: &str) -> Self {
        self.set("class", class)
    }

    /// Adds `name="value"`, escaping the value for a double-quoted attribute.
    pub fn set(mut self, name: &str, value: &str) -> Self {
        self.0.push_str(&format!(
            " {name}=\"{}\"",
            html_escape::encode_double_quoted_attribute(value)
        ));
        self
    }

    /// Adds a boolean attribute such as `disabled`.
    pub fn flag(mut self, name: &str) -> Self {
        self.0.push(' ');
        self.0.push_str(name);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn element(tag: &str, attributes: &Attributes, contents: &str) -> String {
    format!("<{tag}{}>{contents}</{tag}>", attributes.as_str())
}

/// An element without a closing tag (`<hr>`, `<img>`, `<input>`).
pub fn void_element(tag: &str, attributes: &Attributes) -> String {
    format!("<{tag}{}>", attributes.as_str())
}

/// Shorthand for an element without attributes.
pub fn plain_element(tag: &str, contents: &str) -> String {
    element(tag, &Attributes::new(), contents)
}
