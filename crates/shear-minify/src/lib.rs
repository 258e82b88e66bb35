//! HTML minification for shear.
//!
//! A [`Minifier`] pulls events from the `shear-html` scanner and rewrites
//! them according to [`Options`], handing `<style>` and `<script>` bodies to
//! the style and script minifiers.
//!
//! # Example
//!
//! ```
//! use shear_minify::{Options, minify};
//!
//! let options = Options {
//!     collapse_whitespace: true,
//!     ..Options::default()
//! };
//! let out = minify("<p>  Hello,   <b>world</b> </p>", &options).unwrap();
//! assert_eq!(out, "<p>Hello, <b>world</b></p>");
//! ```
//!
//! # Implemented
//!
//! - Whitespace trimming and collapsing outside `pre`, `textarea`, `code`
//! - Comment removal, keeping `<!--! ... -->` and recursing into IE
//!   conditional comments
//! - Optional end tag removal
//! - Attribute cleanup: redundant defaults, empty values, boolean collapse,
//!   `style` and `on*` minification, `class` whitespace
//! - Doctype shortening
//! - `<style>` and `<script>` body minification
//!
//! # Not Implemented
//!
//! - Attribute quote removal
//! - Empty element removal

mod attributes;
/// Style and script minifier traits and their default implementations.
pub mod collaborators;
mod conditional;
/// Error types.
pub mod error;
/// Minification options and their defaults.
pub mod options;
mod rewriter;
mod text;

pub use collaborators::{CssMinifier, JsMinifier, ScriptMinifier, StyleMinifier};
pub use error::{ConfigError, MinifyError};
pub use options::Options;

/// The collaborators one run hands to attribute and text rewriting.
#[derive(Clone, Copy)]
pub(crate) struct Collaborators<'c> {
    pub(crate) styles: &'c dyn StyleMinifier,
    pub(crate) scripts: &'c dyn ScriptMinifier,
}

/// A configured minifier.
///
/// Holds no per-document state, so one instance can minify any number of
/// documents.
pub struct Minifier<'c> {
    options: Options,
    collaborators: Collaborators<'c>,
}

impl Minifier<'static> {
    /// A minifier using the default style and script minifiers.
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self {
            options,
            collaborators: Collaborators {
                styles: &CssMinifier,
                scripts: &JsMinifier,
            },
        }
    }
}

impl Default for Minifier<'static> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<'c> Minifier<'c> {
    /// A minifier using caller-supplied style and script minifiers.
    #[must_use]
    pub const fn with_collaborators(
        options: Options,
        styles: &'c dyn StyleMinifier,
        scripts: &'c dyn ScriptMinifier,
    ) -> Self {
        Self {
            options,
            collaborators: Collaborators { styles, scripts },
        }
    }

    /// The options this minifier applies.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Minify one document.
    ///
    /// # Errors
    ///
    /// Returns [`MinifyError::Scan`] if the markup has an unterminated
    /// comment or ignore block.
    pub fn run(&self, input: &str) -> Result<String, MinifyError> {
        rewriter::rewrite(input, &self.options, self.collaborators)
    }
}

/// Minify `input` with the default style and script minifiers.
///
/// # Errors
///
/// Returns [`MinifyError::Scan`] if the markup has an unterminated comment or
/// ignore block.
pub fn minify(input: &str, options: &Options) -> Result<String, MinifyError> {
    let collaborators = Collaborators {
        styles: &CssMinifier,
        scripts: &JsMinifier,
    };
    rewriter::rewrite(input, options, collaborators)
}
