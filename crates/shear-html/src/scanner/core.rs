use std::collections::VecDeque;
use std::iter::FusedIterator;

use shear_common::warning::warn_once;

use super::error::{ScanError, ScanIssue};
use super::event::{EndTag, Event, StartTag, TagRef, Text};
use super::helpers::{
    Cursor, find_raw_text_end, match_doctype, match_end_tag, match_start_tag, peek_tag,
};
use crate::elements::{closes_itself, is_inline, is_raw_text, is_void};
use crate::stack::OpenElementStack;

/// Single-pass tag-soup scanner.
///
/// Each call to [`Iterator::next`] yields one event. A single scan step can
/// produce several events at once (an end tag that force-closes intervening
/// elements, or raw text followed by its end tag); those wait in a queue and
/// are handed out in order.
///
/// After a fatal error is yielded the scanner is exhausted.
#[derive(Debug)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,

    /// When false, any new start tag first closes open inline elements.
    html5: bool,

    stack: OpenElementStack<'a>,

    /// Events produced by the last step but not yet yielded.
    pending: VecDeque<Event<'a>>,

    /// The last tag actually written in the source, for text context.
    previous_tag: Option<TagRef<'a>>,

    issues: Vec<ScanIssue>,

    finished: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner in html5 mode.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self::with_html5(input, true)
    }

    /// Create a scanner, choosing whether legacy inline auto-close applies.
    #[must_use]
    pub const fn with_html5(input: &'a str, html5: bool) -> Self {
        Self {
            cursor: Cursor::new(input),
            html5,
            stack: OpenElementStack::new(),
            pending: VecDeque::new(),
            previous_tag: None,
            issues: Vec::new(),
            finished: false,
        }
    }

    /// The elements currently open. Empty once the scanner is exhausted.
    #[must_use]
    pub const fn open_elements(&self) -> &OpenElementStack<'a> {
        &self.stack
    }

    /// Anomalies tolerated so far.
    #[must_use]
    pub fn issues(&self) -> &[ScanIssue] {
        &self.issues
    }

    /// Byte offset of the next unscanned character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Record a tolerated anomaly and report it through the warning system.
    fn parse_warning(&mut self, message: String, offset: usize) {
        let _ = warn_once("HTML", &message);
        self.issues.push(ScanIssue { message, offset });
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Scan one construct at the cursor, queueing the events it produces.
    ///
    /// The order of checks is the grammar's disambiguation policy: raw text
    /// wins over everything, then comment, ignore block, doctype, end tag,
    /// start tag, and finally plain text.
    fn step(&mut self) -> Result<(), ScanError> {
        if let Some(name) = self.stack.current().filter(|name| is_raw_text(name)) {
            self.scan_raw_text(name);
            return Ok(());
        }

        if self.cursor.next_few_characters_are("<!--") {
            return self.scan_comment();
        }

        if self.cursor.next_few_characters_are("<%") {
            return self.scan_ignore("%>");
        }
        if self.cursor.next_few_characters_are("<?") {
            return self.scan_ignore("?>");
        }

        if let Some(len) = match_doctype(&self.cursor) {
            let doctype = &self.cursor.rest()[..len];
            self.cursor.advance(len);
            self.pending.push_back(Event::Doctype(doctype));
            return Ok(());
        }

        if self.cursor.next_few_characters_are("</") {
            if let Some(end) = match_end_tag(&self.cursor) {
                let offset = self.cursor.position();
                self.cursor.advance(end.len);
                self.previous_tag = Some(TagRef {
                    name: end.name,
                    closing: true,
                });
                self.close_element(end.name, offset);
                return Ok(());
            }
        } else if let Some(start) = match_start_tag(&self.cursor) {
            self.cursor.advance(start.len);
            self.previous_tag = Some(TagRef {
                name: start.name,
                closing: false,
            });
            self.open_element(StartTag {
                name: start.name,
                attributes: start.attributes,
                self_closing: start.self_closing,
            });
            return Ok(());
        }

        self.scan_text();
        Ok(())
    }

    // =========================================================================
    // Constructs
    // =========================================================================

    fn scan_comment(&mut self) -> Result<(), ScanError> {
        let offset = self.cursor.position();
        let body = &self.cursor.rest()["<!--".len()..];
        let close = body
            .find("-->")
            .ok_or(ScanError::UnterminatedComment { offset })?;
        self.pending.push_back(Event::Comment(&body[..close]));
        self.cursor.advance("<!--".len() + close + "-->".len());
        Ok(())
    }

    fn scan_ignore(&mut self, closer: &str) -> Result<(), ScanError> {
        let offset = self.cursor.position();
        let rest = self.cursor.rest();
        let close = rest[2..]
            .find(closer)
            .ok_or(ScanError::UnterminatedIgnore { offset })?;
        let len = 2 + close + closer.len();
        self.pending.push_back(Event::Ignore(&rest[..len]));
        self.cursor.advance(len);
        Ok(())
    }

    /// Capture the body of a raw-text element verbatim, then close it.
    fn scan_raw_text(&mut self, name: &'a str) {
        let offset = self.cursor.position();
        let rest = self.cursor.rest();

        let Some((body_len, tag_len)) = find_raw_text_end(rest, name) else {
            // Lenient: the rest of the document is the body, and the flush at
            // end of input closes the element.
            self.parse_warning(format!("<{name}> is never closed"), offset);
            if !rest.is_empty() {
                self.pending.push_back(Event::Text(Text {
                    text: rest,
                    previous: self.previous_tag,
                    next: None,
                }));
            }
            self.cursor.advance_to_end();
            return;
        };

        let body = &rest[..body_len];
        self.cursor.advance(body_len);
        let closing = peek_tag(&self.cursor);
        if !body.is_empty() {
            self.pending.push_back(Event::Text(Text {
                text: body,
                previous: self.previous_tag,
                next: closing,
            }));
        }
        self.cursor.advance(tag_len);
        self.previous_tag = closing;
        self.close_element(name, offset + body_len);
    }

    /// Consume a text run up to the next `<` that starts real markup.
    ///
    /// A `<` that begins nothing recognizable is literal text, so the run
    /// always consumes at least one character.
    fn scan_text(&mut self) {
        let start = self.cursor.position();
        let _ = self.cursor.consume();
        loop {
            match self.cursor.rest().find('<') {
                None => {
                    self.cursor.advance_to_end();
                    break;
                }
                Some(next) => {
                    self.cursor.advance(next);
                    if self.starts_markup() {
                        break;
                    }
                    let _ = self.cursor.consume();
                }
            }
        }
        self.pending.push_back(Event::Text(Text {
            text: self.cursor.since(start),
            previous: self.previous_tag,
            next: peek_tag(&self.cursor),
        }));
    }

    /// Whether the cursor sits on a construct other than plain text.
    fn starts_markup(&self) -> bool {
        let cursor = &self.cursor;
        cursor.next_few_characters_are("<!--")
            || cursor.next_few_characters_are("<%")
            || cursor.next_few_characters_are("<?")
            || match_doctype(cursor).is_some()
            || match_end_tag(cursor).is_some()
            || match_start_tag(cursor).is_some()
    }

    // =========================================================================
    // Open-element stack
    // =========================================================================

    /// Apply implied closes for a new start tag, then open it.
    fn open_element(&mut self, tag: StartTag<'a>) {
        if !self.html5 {
            while let Some(inline) = self.stack.current().filter(|name| is_inline(name)) {
                let _ = self.stack.pop();
                self.emit_end(inline, true);
            }
        }

        if closes_itself(tag.name) && self.stack.current_is(tag.name) {
            if let Some(open) = self.stack.pop() {
                self.emit_end(open, true);
            }
        }

        if !is_void(tag.name) && !tag.self_closing {
            self.stack.push(tag.name);
        }
        self.pending.push_back(Event::StartTag(tag));
    }

    /// Close the nearest open element named `name` and everything above it.
    ///
    /// Elements above the match are closed implicitly. A name that is not open
    /// at all is absorbed.
    fn close_element(&mut self, name: &str, offset: usize) {
        let popped = self.stack.pop_until_tag(name);
        let Some(last) = popped.len().checked_sub(1) else {
            self.parse_warning(format!("unmatched end tag </{name}> ignored"), offset);
            return;
        };
        for (index, open) in popped.into_iter().enumerate() {
            self.emit_end(open, index != last);
        }
    }

    /// End of input: close every open element, top first.
    fn flush_open_elements(&mut self) {
        for open in self.stack.pop_all() {
            self.emit_end(open, true);
        }
    }

    fn emit_end(&mut self, name: &'a str, implied: bool) {
        self.pending
            .push_back(Event::EndTag(EndTag { name, implied }));
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Event<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.finished {
                return None;
            }
            if self.cursor.is_eof() {
                self.flush_open_elements();
                self.finished = true;
                continue;
            }

            let before = self.cursor.position();
            if let Err(error) = self.step() {
                self.finished = true;
                self.pending.clear();
                return Some(Err(error));
            }
            if self.cursor.position() == before {
                self.finished = true;
                self.pending.clear();
                return Some(Err(ScanError::Stalled { offset: before }));
            }
        }
    }
}

impl FusedIterator for Scanner<'_> {}
