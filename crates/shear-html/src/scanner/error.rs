use thiserror::Error;

/// A fatal scan error. The run is aborted and no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// `<!--` with no `-->` anywhere after it.
    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment {
        /// Byte offset of `<!--`.
        offset: usize,
    },
    /// `<%` or `<?` with no matching closer.
    #[error("unterminated ignore block starting at byte {offset}")]
    UnterminatedIgnore {
        /// Byte offset of the opener.
        offset: usize,
    },
    /// A scan step consumed nothing.
    #[error("scanner made no progress at byte {offset}")]
    Stalled {
        /// Byte offset where the scanner stopped.
        offset: usize,
    },
}

/// A structural anomaly the scanner tolerated, such as a stray end tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanIssue {
    /// What was tolerated.
    pub message: String,
    /// Byte offset where it was found.
    pub offset: usize,
}
