//! Error types for minification and configuration.

use shear_html::ScanError;
use thiserror::Error;

/// A run that could not produce output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinifyError {
    /// The markup could not be tokenized.
    #[error("parse error: {0}")]
    Scan(#[from] ScanError),
}

/// Options that could not be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options JSON is malformed or has a value of the wrong type.
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
}
