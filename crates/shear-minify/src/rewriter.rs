//! The rewrite engine: an [`EventSink`] that re-serializes markup events
//! with redundancy removed.

use std::borrow::Cow;

use shear_common::warning::warn_once;
use shear_html::elements::is_void;
use shear_html::{EndTag, EventSink, Scanner, StartTag, Text, drive};
use shear_js::JsOptions;

use crate::Collaborators;
use crate::attributes;
use crate::conditional::{self, ConditionalComment};
use crate::error::MinifyError;
use crate::options::Options;
use crate::text::{
    collapse, is_blank, is_legacy_comment_wrapped, strip_cdata_wrapper, strip_comment_wrapper,
    trim_end, trim_start,
};

/// Tags that are written `<br>` even when the source said `<br/>`.
const NO_END_SLASH: &[&str] = &["br", "input", "img", "area", "col"];

/// End tags the parser can infer from context.
const OPTIONAL_TAGS: &[&str] = &[
    "option", "th", "td", "tr", "thead", "tbody", "tfoot", "head", "body", "html",
];

/// Elements whose text is written exactly as found.
const PRESERVE_FORMATTING: &[&str] = &["pre", "textarea", "code"];

/// Elements whose trailing whitespace can affect layout.
const KEEP_TRAILING_SPACE: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6"];

/// `type` values a script minifier can handle. Absent and empty count too.
const JAVASCRIPT_TYPES: &[&str] = &[
    "text/javascript",
    "application/javascript",
    "text/ecmascript",
    "application/ecmascript",
    "application/x-javascript",
    "text/jscript",
    "module",
];

/// Minify one document with fresh state.
pub fn rewrite(
    input: &str,
    options: &Options,
    collaborators: Collaborators<'_>,
) -> Result<String, MinifyError> {
    let mut rewriter = Rewriter::new(options, collaborators);
    drive(Scanner::with_html5(input, options.html5), &mut rewriter)?;
    Ok(rewriter.finish())
}

/// What the next text run sits after.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LastOpen {
    /// An element that can hold text, by authored name.
    Element(String),
    /// A removed `<% %>` or `<? ?>` block.
    Placeholder,
}

/// Per-run state. Dropped when the run returns.
struct Rewriter<'a, 'o> {
    options: &'o Options,
    collaborators: Collaborators<'o>,

    last_open: Option<LastOpen>,

    /// The previous event was an ignore block that was kept, so whitespace
    /// right after it is content.
    after_kept_ignore: bool,

    /// The last `<script>` declared a type the script minifier handles.
    script_is_javascript: bool,
    /// The last `<script>` was `type="module"`.
    script_is_module: bool,
    /// The last `<style>` declared CSS.
    style_is_css: bool,

    fragments: Vec<Cow<'a, str>>,
}

impl<'a, 'o> Rewriter<'a, 'o> {
    const fn new(options: &'o Options, collaborators: Collaborators<'o>) -> Self {
        Self {
            options,
            collaborators,
            last_open: None,
            after_kept_ignore: false,
            script_is_javascript: true,
            script_is_module: false,
            style_is_css: true,
            fragments: Vec::new(),
        }
    }

    fn finish(self) -> String {
        self.fragments.concat()
    }

    fn push(&mut self, fragment: impl Into<Cow<'a, str>>) {
        self.fragments.push(fragment.into());
    }

    fn tag_name<'n>(&self, name: &'n str) -> Cow<'n, str> {
        if self.options.case_sensitive {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(name.to_ascii_lowercase())
        }
    }

    /// Whether the last opened element is one of `names`.
    fn last_open_is(&self, names: &[&str]) -> bool {
        match &self.last_open {
            Some(LastOpen::Element(open)) => {
                names.iter().any(|name| name.eq_ignore_ascii_case(open))
            }
            _ => false,
        }
    }

    /// Record whether the script or style just opened can be minified.
    fn note_content_type(&mut self, tag: &StartTag<'a>) {
        let declared = tag
            .attributes
            .iter()
            .find(|attribute| attribute.name.eq_ignore_ascii_case("type"))
            .and_then(|attribute| attribute.value)
            .map(str::trim);

        if tag.name.eq_ignore_ascii_case("script") {
            self.script_is_javascript = declared.is_none_or(|declared| {
                declared.is_empty()
                    || JAVASCRIPT_TYPES
                        .iter()
                        .any(|known| known.eq_ignore_ascii_case(declared))
            });
            self.script_is_module =
                declared.is_some_and(|declared| declared.eq_ignore_ascii_case("module"));
        } else if tag.name.eq_ignore_ascii_case("style") {
            self.style_is_css =
                declared.is_none_or(|declared| declared.eq_ignore_ascii_case("text/css"));
        }
    }

    /// Apply the script and style transforms to a raw-text body.
    fn minify_raw_text<'t>(&self, body: Cow<'t, str>) -> Cow<'t, str> {
        let is_script = self.last_open_is(&["script"]);
        let is_style = self.last_open_is(&["style"]);
        if !is_script && !is_style {
            return body;
        }

        let mut body = body;
        if self.options.remove_comments_from_cdata {
            body = strip_borrowed(body, strip_comment_wrapper);
        }
        if self.options.remove_cdata_sections_from_cdata {
            body = strip_borrowed(body, strip_cdata_wrapper);
        }

        if is_style && self.style_is_css && self.options.cssmin {
            return Cow::Owned(self.collaborators.styles.minify_stylesheet(&body));
        }

        if is_script
            && self.script_is_javascript
            && self.options.jsmin
            && !is_legacy_comment_wrapped(&body)
        {
            let js_options = JsOptions {
                module: self.script_is_module,
                ..JsOptions::default()
            };
            match self.collaborators.scripts.minify_script(&body, &js_options) {
                Ok(minified) => return Cow::Owned(minified),
                Err(error) => {
                    let _ = warn_once("JS", &format!("script left unminified: {error}"));
                }
            }
        }
        body
    }
}

impl<'a> EventSink<'a> for Rewriter<'a, '_> {
    fn doctype(&mut self, doctype: &'a str) {
        if self.options.use_short_doctype {
            self.push("<!DOCTYPE html>");
        } else {
            self.push(collapse(doctype));
        }
    }

    fn comment(&mut self, body: &'a str) {
        self.after_kept_ignore = false;

        if let Some(conditional) = ConditionalComment::parse(body) {
            match rewrite(conditional.interior, self.options, self.collaborators) {
                Ok(interior) => self.push(format!(
                    "<!--{}{interior}{}-->",
                    conditional.opener, conditional.closer
                )),
                Err(error) => {
                    let _ = warn_once(
                        "HTML",
                        &format!("conditional comment left as is: {error}"),
                    );
                    self.push(format!("<!--{body}-->"));
                }
            }
            return;
        }

        if conditional::has_marker(body) {
            self.push(format!("<!--{body}-->"));
            return;
        }

        if !self.options.remove_comments || body.starts_with('!') {
            self.push(format!("<!--{body}-->"));
        }
    }

    fn ignore(&mut self, text: &'a str) {
        if self.options.remove_ignored {
            self.after_kept_ignore = false;
            self.last_open = Some(LastOpen::Placeholder);
        } else {
            self.push(text);
            self.after_kept_ignore = true;
        }
    }

    fn start_tag(&mut self, tag: &StartTag<'a>) {
        let mut out = format!("<{}", self.tag_name(tag.name));
        for attribute in &tag.attributes {
            if let Some(rendered) =
                attributes::render(tag.name, attribute, self.options, self.collaborators)
            {
                out.push(' ');
                out.push_str(&rendered);
            }
        }
        let drops_slash = NO_END_SLASH
            .iter()
            .any(|name| name.eq_ignore_ascii_case(tag.name));
        if tag.self_closing && !drops_slash {
            out.push_str(" /");
        }
        out.push('>');
        self.push(out);

        self.note_content_type(tag);

        let holds_text = !is_void(tag.name)
            && !tag.self_closing
            && !(self.options.remove_optional_tags && is_optional(tag.name));
        self.last_open = holds_text.then(|| LastOpen::Element(tag.name.to_string()));
        self.after_kept_ignore = false;
    }

    fn end_tag(&mut self, tag: &EndTag<'a>) {
        self.after_kept_ignore = false;
        if self.options.remove_optional_tags && is_optional(tag.name) {
            return;
        }
        if !self.last_open_is(&["source"]) {
            let name = self.tag_name(tag.name).into_owned();
            self.push(format!("</{name}>"));
        }
        self.last_open = None;
    }

    fn text(&mut self, text: &Text<'a>) {
        if self.last_open_is(PRESERVE_FORMATTING) {
            self.push(text.text);
            return;
        }

        let mut body: Cow<'a, str> = Cow::Borrowed(text.text);
        if !self.after_kept_ignore && is_blank(&body) {
            body = Cow::Borrowed("");
        }

        if self.options.collapse_whitespace {
            if self.last_open.is_some() {
                body = strip_borrowed(body, trim_start);
                if !self.last_open_is(KEEP_TRAILING_SPACE) {
                    body = strip_borrowed(body, trim_end);
                }
            }
            if !self.last_open_is(&["script", "style"]) {
                body = Cow::Owned(collapse(&body));
            }
        }

        let body = self.minify_raw_text(body);
        if !body.is_empty() {
            self.push(body);
        }
        self.after_kept_ignore = false;
    }
}

fn is_optional(name: &str) -> bool {
    OPTIONAL_TAGS
        .iter()
        .any(|optional| optional.eq_ignore_ascii_case(name))
}

/// Apply a slicing function without giving up a borrow from the input.
fn strip_borrowed<'t>(text: Cow<'t, str>, strip: fn(&str) -> &str) -> Cow<'t, str> {
    match text {
        Cow::Borrowed(text) => Cow::Borrowed(strip(text)),
        Cow::Owned(text) => Cow::Owned(strip(&text).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{CssMinifier, JsMinifier};

    const DEFAULTS: Collaborators<'static> = Collaborators {
        styles: &CssMinifier,
        scripts: &JsMinifier,
    };

    #[test]
    fn test_fresh_state_per_run() {
        let options = Options {
            collapse_whitespace: true,
            ..Options::default()
        };
        let first = rewrite("<div> a </div>", &options, DEFAULTS).unwrap();
        let second = rewrite(" b ", &options, DEFAULTS).unwrap();
        assert_eq!(first, "<div>a</div>");
        assert_eq!(second, " b ");
    }

    #[test]
    fn test_strip_borrowed_keeps_borrow() {
        let text = "  x  ";
        let stripped = strip_borrowed(Cow::Borrowed(text), trim_start);
        assert!(matches!(stripped, Cow::Borrowed("x  ")));
    }
}
