//! Tag-soup scanner for the shear minifier.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner** - a single-pass, lazy producer of markup events
//!   - Doctype, comment, ignore block (`<% %>`, `<? ?>`), start tag, end tag, text
//!   - Raw-text elements (`script`, `style`) captured verbatim
//!   - Attribute parsing with double, single, and unquoted values
//!
//! - **Open-element stack** - the content-model approximation
//!   - Implied closes for elements that close themselves (`li`, `p`, `td`, ...)
//!   - Legacy inline auto-close when html5 mode is off
//!   - Void elements are never pushed
//!   - Stray end tags are absorbed, end of input flushes everything
//!
//! - **Event sink** - a consumer trait with one method per event kind, and
//!   [`drive`] to pump a scanner into it
//!
//! # Not Implemented
//!
//! - Tree construction (no DOM is ever built)
//! - Character reference decoding (text is passed through as written)
//! - Streaming across chunk boundaries

/// Content-model tables: void, inline, closes-itself, raw-text.
pub mod elements;
/// Tag-soup scanner producing markup events.
pub mod scanner;
/// Consumer side of the scanner.
pub mod sink;
/// Stack of open elements.
pub mod stack;

pub use scanner::{
    Attribute, EndTag, Event, ScanError, ScanIssue, Scanner, StartTag, TagRef, Text,
};
pub use sink::{EventSink, drive};
pub use stack::OpenElementStack;
