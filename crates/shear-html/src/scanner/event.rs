//! Events produced by the scanner.
//!
//! Every string in an event borrows from the input document. Consumers copy
//! whatever they need to keep past the callback.

use std::borrow::Cow;

use strum_macros::Display;

/// An attribute on a start tag.
///
/// A valueless attribute (`<input disabled>`) has no value at all, which is
/// distinct from an empty value (`<input disabled="">`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Name as authored.
    pub name: &'a str,
    /// Value with its quotes removed, or `None` for a valueless attribute.
    pub value: Option<&'a str>,
    /// Value with every unescaped `"` replaced by `&quot;`, so it can be
    /// re-emitted inside double quotes.
    pub escaped_value: Option<Cow<'a, str>>,
}

impl<'a> Attribute<'a> {
    /// Create an attribute, computing its escaped value.
    #[must_use]
    pub fn new(name: &'a str, value: Option<&'a str>) -> Self {
        Self {
            name,
            value,
            escaped_value: value.map(escape_quotes),
        }
    }

    /// Whether the attribute carries a value (possibly empty).
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// Replace each `"` not preceded by a backslash with `&quot;`.
#[must_use]
pub fn escape_quotes(value: &str) -> Cow<'_, str> {
    if !value.contains('"') {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    let mut previous = None;
    for c in value.chars() {
        if c == '"' && previous != Some('\\') {
            escaped.push_str("&quot;");
        } else {
            escaped.push(c);
        }
        previous = Some(c);
    }
    Cow::Owned(escaped)
}

/// A start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    /// Tag name as authored.
    pub name: &'a str,
    /// Attributes in source order.
    pub attributes: Vec<Attribute<'a>>,
    /// Whether the source closed the tag with `/>`.
    pub self_closing: bool,
}

/// An end tag, either written in the source or implied by the content model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndTag<'a> {
    /// Name of the element being closed, as it was written when opened.
    pub name: &'a str,
    /// True when the scanner synthesized this close.
    pub implied: bool,
}

/// A reference to a neighbouring tag, used as context for text runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRef<'a> {
    /// Tag name as authored.
    pub name: &'a str,
    /// Whether it is an end tag.
    pub closing: bool,
}

/// A run of character data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Text<'a> {
    /// The text, verbatim.
    pub text: &'a str,
    /// The last tag event emitted before this run.
    pub previous: Option<TagRef<'a>>,
    /// The tag that follows this run in the source, if one does.
    pub next: Option<TagRef<'a>>,
}

/// A markup event.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Event<'a> {
    /// `<!DOCTYPE ...>`, the full literal text.
    Doctype(&'a str),
    /// `<!--...-->`, the interior text only.
    Comment(&'a str),
    /// `<% ... %>` or `<? ... ?>`, including delimiters.
    Ignore(&'a str),
    /// A start tag.
    StartTag(StartTag<'a>),
    /// An end tag.
    EndTag(EndTag<'a>),
    /// A text run.
    Text(Text<'a>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes_skips_backslashed() {
        assert_eq!(escape_quotes(r#"a"b\"c"#), r#"a&quot;b\"c"#);
    }

    #[test]
    fn test_escape_adjacent_quotes() {
        assert_eq!(escape_quotes(r#""test""#), "&quot;test&quot;");
        assert_eq!(escape_quotes(r#""""#), "&quot;&quot;");
    }

    #[test]
    fn test_escape_without_quotes_borrows() {
        assert!(matches!(escape_quotes("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_event_display_is_kind() {
        assert_eq!(Event::Comment("x").to_string(), "Comment");
    }
}
