//! Consumer side of the scanner.
//!
//! An [`EventSink`] receives one callback per event kind. [`drive`] pulls
//! events from a [`Scanner`] and dispatches them until input is exhausted or
//! a fatal error stops the run.

use crate::scanner::{EndTag, Event, ScanError, Scanner, StartTag, Text};

/// Receives markup events in document order.
///
/// Every callback has a no-op default so a sink only implements what it
/// cares about.
pub trait EventSink<'a> {
    /// `<!DOCTYPE ...>`
    fn doctype(&mut self, _doctype: &'a str) {}

    /// Interior of `<!--...-->`.
    fn comment(&mut self, _text: &'a str) {}

    /// `<% ... %>` or `<? ... ?>`, delimiters included.
    fn ignore(&mut self, _text: &'a str) {}

    /// A start tag.
    fn start_tag(&mut self, _tag: &StartTag<'a>) {}

    /// An end tag, written or implied.
    fn end_tag(&mut self, _tag: &EndTag<'a>) {}

    /// A text run.
    fn text(&mut self, _text: &Text<'a>) {}
}

/// Pump every event from `scanner` into `sink`.
///
/// # Errors
///
/// Returns the first fatal [`ScanError`]. Events before it have already been
/// delivered.
pub fn drive<'a, S>(scanner: Scanner<'a>, sink: &mut S) -> Result<(), ScanError>
where
    S: EventSink<'a> + ?Sized,
{
    for event in scanner {
        match event? {
            Event::Doctype(doctype) => sink.doctype(doctype),
            Event::Comment(text) => sink.comment(text),
            Event::Ignore(text) => sink.ignore(text),
            Event::StartTag(tag) => sink.start_tag(&tag),
            Event::EndTag(tag) => sink.end_tag(&tag),
            Event::Text(text) => sink.text(&text),
        }
    }
    Ok(())
}
