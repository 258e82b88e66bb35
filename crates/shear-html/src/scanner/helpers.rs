//! Cursor and pattern helpers for the scanner.
//!
//! The scanner never backtracks on committed input. Pattern matchers work on a
//! copy of the cursor and only hand back how far they got, so a failed match
//! leaves the scanner exactly where it was.

use crate::elements::{is_html_whitespace, is_name_char};

use super::event::{Attribute, TagRef};

/// A byte position into the input, advanced one character at a time.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<'a> Cursor<'a> {
    /// A cursor at the start of `input`.
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Input between `start` and the current position.
    pub fn since(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consume the next character.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip `bytes` bytes. Callers only pass lengths of matched ASCII text or
    /// offsets returned by `str::find`, so the position stays on a boundary.
    pub fn advance(&mut self, bytes: usize) {
        self.pos = (self.pos + bytes).min(self.input.len());
    }

    /// Move to the end of input.
    pub const fn advance_to_end(&mut self) {
        self.pos = self.input.len();
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// "If the next few characters are..."
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.rest().starts_with(target)
    }

    /// Same as [`Self::next_few_characters_are`], ASCII case-insensitively.
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.rest()
            .as_bytes()
            .get(..target.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(target.as_bytes()))
    }

    /// Consume characters while `predicate` holds, returning them.
    pub fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&predicate) {
            let _ = self.consume();
        }
        self.since(start)
    }

    /// Consume HTML whitespace. Returns whether any was consumed.
    pub fn skip_whitespace(&mut self) -> bool {
        !self.consume_while(is_html_whitespace).is_empty()
    }

    /// Consume a tag or attribute name, `[A-Za-z0-9_:-]+`.
    pub fn consume_name(&mut self) -> Option<&'a str> {
        let name = self.consume_while(is_name_char);
        (!name.is_empty()).then_some(name)
    }
}

// =============================================================================
// Tag Patterns
// =============================================================================

/// A start tag recognized at the cursor.
#[derive(Debug)]
pub struct StartTagMatch<'a> {
    pub name: &'a str,
    pub attributes: Vec<Attribute<'a>>,
    pub self_closing: bool,
    /// Bytes covered by the tag, `<` through `>`.
    pub len: usize,
}

/// An end tag recognized at the cursor.
#[derive(Debug)]
pub struct EndTagMatch<'a> {
    pub name: &'a str,
    pub len: usize,
}

/// Match `<name attr... /?>` at the start of `cursor`.
pub fn match_start_tag<'a>(cursor: &Cursor<'a>) -> Option<StartTagMatch<'a>> {
    let mut lookahead = *cursor;
    let start = lookahead.position();
    if lookahead.consume()? != '<' {
        return None;
    }
    let name = lookahead.consume_name()?;
    let mut attributes = Vec::new();

    loop {
        let _ = lookahead.skip_whitespace();
        match lookahead.peek()? {
            '>' => {
                let _ = lookahead.consume();
                return Some(StartTagMatch {
                    name,
                    attributes,
                    self_closing: false,
                    len: lookahead.position() - start,
                });
            }
            '/' if lookahead.peek_at(1) == Some('>') => {
                lookahead.advance(2);
                return Some(StartTagMatch {
                    name,
                    attributes,
                    self_closing: true,
                    len: lookahead.position() - start,
                });
            }
            c if is_name_char(c) => attributes.push(consume_attribute(&mut lookahead)?),
            _ => return None,
        }
    }
}

/// `name`, optionally followed by `= value`.
fn consume_attribute<'a>(lookahead: &mut Cursor<'a>) -> Option<Attribute<'a>> {
    let name = lookahead.consume_name()?;

    let before_equals = *lookahead;
    let _ = lookahead.skip_whitespace();
    if lookahead.peek() != Some('=') {
        *lookahead = before_equals;
        return Some(Attribute::new(name, None));
    }
    let _ = lookahead.consume();
    let _ = lookahead.skip_whitespace();

    let value = match lookahead.peek()? {
        quote @ ('"' | '\'') => {
            let value = consume_quoted(lookahead, quote)?;
            // Stray characters glued to the closing quote, e.g. the second
            // quote in x="x'"", are dropped.
            let _ = lookahead.consume_while(|c| {
                !is_html_whitespace(c) && !is_name_char(c) && c != '/' && c != '>'
            });
            value
        }
        _ => {
            let value = lookahead.consume_while(|c| !is_html_whitespace(c) && c != '>');
            if value.is_empty() {
                return None;
            }
            value
        }
    };
    Some(Attribute::new(name, Some(value)))
}

/// Consume a quoted value, honouring backslash escapes. Returns the interior.
fn consume_quoted<'a>(lookahead: &mut Cursor<'a>, quote: char) -> Option<&'a str> {
    let _ = lookahead.consume();
    let start = lookahead.position();
    loop {
        match lookahead.consume()? {
            '\\' => {
                let _ = lookahead.consume()?;
            }
            c if c == quote => {
                let end = lookahead.position() - quote.len_utf8();
                return Some(&lookahead.input[start..end]);
            }
            _ => {}
        }
    }
}

/// Match `</name ...>` at the start of `cursor`.
pub fn match_end_tag<'a>(cursor: &Cursor<'a>) -> Option<EndTagMatch<'a>> {
    let mut lookahead = *cursor;
    let start = lookahead.position();
    if !lookahead.next_few_characters_are("</") {
        return None;
    }
    lookahead.advance(2);
    let name = lookahead.consume_name()?;
    let close = lookahead.rest().find('>')?;
    lookahead.advance(close + 1);
    Some(EndTagMatch {
        name,
        len: lookahead.position() - start,
    })
}

/// Match `<!DOCTYPE ...>` at the start of `cursor`, returning its length.
pub fn match_doctype(cursor: &Cursor<'_>) -> Option<usize> {
    if !cursor.next_few_characters_are_case_insensitive("<!DOCTYPE ") {
        return None;
    }
    let body = &cursor.rest()["<!DOCTYPE ".len()..];
    match body.find('>') {
        Some(0) | None => None,
        Some(close) => Some("<!DOCTYPE ".len() + close + 1),
    }
}

/// Cheap look at the tag starting at `cursor`, without validating it.
pub fn peek_tag<'a>(cursor: &Cursor<'a>) -> Option<TagRef<'a>> {
    let mut lookahead = *cursor;
    if lookahead.consume()? != '<' {
        return None;
    }
    let closing = lookahead.peek() == Some('/');
    if closing {
        let _ = lookahead.consume();
    }
    lookahead.consume_name().map(|name| TagRef { name, closing })
}

/// Locate the end tag that closes raw-text element `name`.
///
/// Returns the byte offset of `</name` and the length of the whole end tag.
/// The name must be followed by a character that cannot continue a name, so
/// `</scripts>` does not close `script`.
pub fn find_raw_text_end(rest: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = rest.as_bytes();
    let mut from = 0;
    while let Some(found) = rest[from..].find("</") {
        let at = from + found;
        let name_start = at + 2;
        let name_end = name_start + name.len();
        let name_matches = bytes
            .get(name_start..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()));
        let boundary = bytes
            .get(name_end)
            .is_none_or(|&b| !is_name_char(char::from(b)));
        if name_matches && boundary {
            let close = rest[name_end..].find('>')?;
            return Some((at, name_end + close + 1 - at));
        }
        from = name_start;
    }
    None
}
