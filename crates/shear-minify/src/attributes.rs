//! Per-attribute rewriting policy.
//!
//! Each attribute of a start tag is either dropped, written bare, or written
//! as `name="value"` with a possibly shortened value. Steps run in a fixed
//! order: redundant default, blank value, boolean collapse, then value
//! cleaning (style, event handlers, class, trimming).

use std::borrow::Cow;

use shear_html::Attribute;
use shear_html::scanner::event::escape_quotes;
use shear_js::JsOptions;

use crate::Collaborators;
use crate::options::Options;
use crate::text::{collapse, trim};

/// `(tag, attribute, value)` triples where the value is the default anyway.
const REDUNDANT_DEFAULTS: &[(&str, &str, &str)] = &[
    ("script", "type", "text/javascript"),
    ("input", "type", "text"),
    ("form", "method", "get"),
    ("script", "language", "javascript"),
    ("style", "type", "text/css"),
    ("area", "shape", "rect"),
];

const SCRIPT_TYPE_DEFAULT: (&str, &str, &str) = ("script", "type", "text/javascript");

const STYLE_LINK_TYPE_DEFAULTS: &[(&str, &str, &str)] =
    &[("style", "type", "text/css"), ("link", "type", "text/css")];

/// Attributes whose presence means something even with an empty value.
const KEEP_WHEN_EMPTY: &[&str] = &["value", "title", "src", "alt", "href", "ng-view"];

/// Attributes that are true by presence alone.
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "async",
    "autofocus",
    "checked",
    "compact",
    "declare",
    "defer",
    "disabled",
    "ismap",
    "multiple",
    "nohref",
    "noresize",
    "noshade",
    "nowrap",
    "readonly",
    "required",
    "selected",
];

/// Attributes whose whitespace is content.
const UNTRIMMED: &[&str] = &["title", "value"];

const STYLE_WRAPPER: &str = "_shear_attr{";
const HANDLER_WRAPPER: &str = "function _shear_attr(){";

/// Render one attribute, or `None` to drop it.
pub fn render(
    tag: &str,
    attribute: &Attribute<'_>,
    options: &Options,
    collaborators: Collaborators<'_>,
) -> Option<String> {
    if let Some(value) = attribute.value {
        if is_redundant(tag, attribute.name, value, options) {
            return None;
        }
        if options.remove_empty_attributes
            && trim(value).is_empty()
            && !is_one_of(KEEP_WHEN_EMPTY, attribute.name)
            && !is_boolean(attribute.name)
        {
            return None;
        }
    }

    let name: Cow<'_, str> = if options.case_sensitive {
        Cow::Borrowed(attribute.name)
    } else {
        Cow::Owned(attribute.name.to_ascii_lowercase())
    };

    let Some(raw) = attribute.value else {
        return Some(name.into_owned());
    };

    if options.collapse_boolean_attributes && is_boolean(attribute.name) {
        let value = trim(raw);
        if value.is_empty() || value.eq_ignore_ascii_case(attribute.name) {
            return Some(name.into_owned());
        }
    }

    let escaped = attribute.escaped_value.as_deref().unwrap_or(raw);
    let value = if options.clean_attributes {
        clean_value(attribute.name, raw, escaped, collaborators)
    } else {
        Cow::Borrowed(escaped)
    };
    Some(format!("{name}=\"{value}\""))
}

/// Whether `name=value` on `tag` is a default that can be left out.
fn is_redundant(tag: &str, name: &str, value: &str, options: &Options) -> bool {
    let value = trim(value);
    let matches = |&(default_tag, default_name, default_value): &(&str, &str, &str)| {
        tag.eq_ignore_ascii_case(default_tag)
            && name.eq_ignore_ascii_case(default_name)
            && value.eq_ignore_ascii_case(default_value)
    };

    (options.remove_redundant_attributes && REDUNDANT_DEFAULTS.iter().any(matches))
        || (options.remove_script_type_attributes && matches(&SCRIPT_TYPE_DEFAULT))
        || (options.remove_style_link_type_attributes
            && STYLE_LINK_TYPE_DEFAULTS.iter().any(matches))
}

/// The shortened, quote-safe value of a kept attribute.
fn clean_value<'v>(
    name: &str,
    raw: &str,
    escaped: &'v str,
    collaborators: Collaborators<'_>,
) -> Cow<'v, str> {
    if name.eq_ignore_ascii_case("style") {
        if let Some(style) = minify_style(raw, collaborators) {
            return Cow::Owned(escape_quotes(&style).into_owned());
        }
    } else if is_event_handler(name) {
        if let Some(handler) = minify_handler(raw, collaborators) {
            return Cow::Owned(escape_quotes(&handler).into_owned());
        }
    } else if name.eq_ignore_ascii_case("class") {
        return Cow::Owned(trim(&collapse(escaped)).to_string());
    }

    if is_one_of(UNTRIMMED, name) {
        Cow::Borrowed(escaped)
    } else {
        Cow::Borrowed(trim(escaped))
    }
}

/// Minify declarations by wrapping them in a throwaway rule.
///
/// `None` when nothing is left, so the caller keeps the trimmed original.
fn minify_style(value: &str, collaborators: Collaborators<'_>) -> Option<String> {
    let wrapped = format!("{STYLE_WRAPPER}{value}}}");
    let minified = collaborators.styles.minify_stylesheet(&wrapped);
    let body = minified.strip_prefix(STYLE_WRAPPER)?.strip_suffix('}')?;
    (!body.is_empty()).then(|| body.to_string())
}

/// Minify a handler body by wrapping it in a throwaway function.
///
/// `None` when the minifier rejects it or the result is empty, so the caller
/// keeps the original.
fn minify_handler(value: &str, collaborators: Collaborators<'_>) -> Option<String> {
    let code = strip_javascript_scheme(value);
    let wrapped = format!("{HANDLER_WRAPPER}{code}}}");
    let minified = collaborators
        .scripts
        .minify_script(
            &wrapped,
            &JsOptions {
                single_quote: true,
                ..JsOptions::default()
            },
        )
        .ok()?;
    let body = minified.strip_prefix(HANDLER_WRAPPER)?.strip_suffix('}')?;
    let body = body.strip_suffix(';').unwrap_or(body);
    (!body.is_empty()).then(|| body.to_string())
}

/// `javascript:alert(1)` to `alert(1)`; anything else is only trimmed.
fn strip_javascript_scheme(value: &str) -> &str {
    const SCHEME: &str = "javascript:";
    let value = trim(value);
    match value.get(..SCHEME.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(SCHEME) => trim(&value[SCHEME.len()..]),
        _ => value,
    }
}

/// `on` followed by at least one character.
fn is_event_handler(name: &str) -> bool {
    name.len() > 2 && name.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

fn is_boolean(name: &str) -> bool {
    is_one_of(BOOLEAN_ATTRIBUTES, name)
}

fn is_one_of(set: &[&str], name: &str) -> bool {
    set.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}
