//! Tag-soup scanner.
//!
//! A pull-based producer: [`Scanner`] is an [`Iterator`] over markup events
//! that reads its input left to right exactly once.

/// Scanner state machine and implied-close resolution.
pub mod core;
/// Fatal scan errors and tolerated issues.
pub mod error;
/// Event types.
pub mod event;
mod helpers;

pub use self::core::Scanner;
pub use error::{ScanError, ScanIssue};
pub use event::{Attribute, EndTag, Event, StartTag, TagRef, Text};
