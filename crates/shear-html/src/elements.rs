//! Element classification tables.
//!
//! Every lookup is ASCII case-insensitive: tag soup arrives in any case, and
//! `<BR>` is as void as `<br>`.

/// Elements that never have a body or a closing tag. They are never pushed
/// onto the open-element stack, whether or not the source wrote a slash.
///
/// `source` is not here: it closes itself instead.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "embed", "frame", "hr", "img", "input", "isindex",
    "link", "meta", "param", "track", "wbr",
];

/// Elements auto-closed by any new start tag when html5 mode is off.
pub const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "applet", "b", "basefont", "bdo", "big", "br", "button", "cite",
    "code", "del", "dfn", "em", "font", "i", "iframe", "img", "input", "ins", "kbd", "label",
    "map", "object", "q", "s", "samp", "script", "select", "small", "span", "strike", "strong",
    "sub", "sup", "textarea", "tt", "u", "var",
];

/// Elements implicitly closed by an immediately nested sibling of the same
/// name, e.g. `<li>a<li>b`.
pub const CLOSES_ITSELF: &[&str] = &[
    "colgroup", "dd", "dt", "li", "option", "p", "td", "tfoot", "th", "thead", "tr", "source",
];

/// Elements whose body is captured verbatim up to the matching end tag.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn contains(set: &[&str], name: &str) -> bool {
    set.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Whether `name` is a void element.
#[must_use]
pub fn is_void(name: &str) -> bool {
    contains(VOID_ELEMENTS, name)
}

/// Whether `name` is auto-closed by legacy (non-html5) nesting rules.
#[must_use]
pub fn is_inline(name: &str) -> bool {
    contains(INLINE_ELEMENTS, name)
}

/// Whether a start tag named `name` closes an open element of the same name.
#[must_use]
pub fn closes_itself(name: &str) -> bool {
    contains(CLOSES_ITSELF, name)
}

/// Whether `name` is a raw-text element.
#[must_use]
pub fn is_raw_text(name: &str) -> bool {
    contains(RAW_TEXT_ELEMENTS, name)
}

/// Characters allowed in tag and attribute names: `[A-Za-z0-9_:-]`.
#[must_use]
pub const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-')
}

/// HTML whitespace: space, tab, LF, FF, CR.
#[must_use]
pub const fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_ignore_case() {
        assert!(is_void("BR"));
        assert!(is_raw_text("Script"));
        assert!(closes_itself("LI"));
        assert!(is_inline("Span"));
    }

    #[test]
    fn test_source_is_not_void() {
        assert!(!is_void("source"));
        assert!(closes_itself("source"));
    }

    #[test]
    fn test_name_chars() {
        assert!("ng-view".chars().all(is_name_char));
        assert!("xml:lang".chars().all(is_name_char));
        assert!(!is_name_char('>'));
        assert!(!is_name_char('='));
    }
}
