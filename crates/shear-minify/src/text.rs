//! Whitespace handling and wrapper stripping for text runs.

use shear_html::elements::is_html_whitespace;

/// Whether `text` is nothing but whitespace (and not empty).
pub fn is_blank(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_html_whitespace)
}

pub fn trim_start(text: &str) -> &str {
    text.trim_start_matches(is_html_whitespace)
}

pub fn trim_end(text: &str) -> &str {
    text.trim_end_matches(is_html_whitespace)
}

pub fn trim(text: &str) -> &str {
    text.trim_matches(is_html_whitespace)
}

/// Replace every whitespace run with one space.
pub fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if is_html_whitespace(c) {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// `<!--`, whitespace, content, whitespace, `-->`: the old trick for hiding
/// scripts from browsers that did not know `<script>`.
pub fn is_legacy_comment_wrapped(text: &str) -> bool {
    let Some(open) = text.find("<!--") else {
        return false;
    };
    let after = &text[open + "<!--".len()..];
    after.match_indices("-->").any(|(close, _)| {
        let inner = &after[..close];
        inner.starts_with(is_html_whitespace)
            && inner.ends_with(is_html_whitespace)
            && !trim(inner).is_empty()
    })
}

/// Remove a leading `<!--` and a trailing `-->`, each with surrounding
/// whitespace. Either may be missing.
pub fn strip_comment_wrapper(text: &str) -> &str {
    let body = trim_start(text).strip_prefix("<!--").unwrap_or(text);
    trim_end(body).strip_suffix("-->").unwrap_or(body)
}

/// Remove `/*<![CDATA[*/ ... /*]]>*/` or `//<![CDATA[ ... //]]>` wrappers.
///
/// The line form drops the rest of the opening line. Leading and trailing
/// halves are matched independently.
pub fn strip_cdata_wrapper(text: &str) -> &str {
    let body = strip_cdata_open(text).unwrap_or(text);
    strip_cdata_close(body).unwrap_or(body)
}

fn strip_cdata_open(text: &str) -> Option<&str> {
    let lead = trim_start(text);
    if let Some(rest) = lead.strip_prefix("/*") {
        let rest = trim_start(rest).strip_prefix("<![CDATA[")?;
        return trim_start(rest).strip_prefix("*/");
    }
    let rest = trim_start(lead.strip_prefix("//")?).strip_prefix("<![CDATA[")?;
    let line_end = rest
        .find(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
        .unwrap_or(rest.len());
    Some(&rest[line_end..])
}

fn strip_cdata_close(text: &str) -> Option<&str> {
    let tail = trim_end(text);
    if let Some(rest) = tail.strip_suffix("*/") {
        let rest = trim_end(rest).strip_suffix("]]>")?;
        return trim_end(rest).strip_suffix("/*");
    }
    trim_end(tail.strip_suffix("]]>")?).strip_suffix("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse() {
        assert_eq!(collapse(" foo \n\t bar  "), " foo bar ");
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(" \r\n\t"));
        assert!(!is_blank(""));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_legacy_comment_wrapper() {
        assert!(is_legacy_comment_wrapped("<!-- alert(1) -->"));
        assert!(!is_legacy_comment_wrapped("<!--alert(1)-->"));
        assert!(!is_legacy_comment_wrapped("alert(\"<!--\")"));
    }

    #[test]
    fn test_comment_wrapper() {
        assert_eq!(strip_comment_wrapper(" <!-- p{} --> "), " p{} ");
        assert_eq!(strip_comment_wrapper("<!--alert(1)"), "alert(1)");
        assert_eq!(strip_comment_wrapper("alert(1)"), "alert(1)");
    }

    #[test]
    fn test_cdata_block_comments() {
        assert_eq!(strip_cdata_wrapper("/*<![CDATA[*/alert(1)/*]]>*/"), "alert(1)");
        assert_eq!(
            strip_cdata_wrapper(" /* \n\t  <![CDATA[  */ alert(1) /*  ]]>  */ \n "),
            " alert(1) "
        );
    }

    #[test]
    fn test_cdata_line_comments() {
        assert_eq!(strip_cdata_wrapper("//<![CDATA[\nalert(1)\n//]]>"), "\nalert(1)\n");
        assert_eq!(
            strip_cdata_wrapper("\n\n//<![CDATA[ junk\nalert(1)//]]>"),
            "\nalert(1)"
        );
    }
}
