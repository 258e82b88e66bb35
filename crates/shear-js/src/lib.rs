//! JavaScript minification for the shear minifier.
//!
//! Uses [Boa](https://boajs.dev/) to check that a script parses, then
//! [oxc](https://oxc.rs/) to parse, optionally compress, and print it in
//! minified form. The printed code is safe to place inside a `<script>`
//! element: it never contains `</script`.
//!
//! # Example
//!
//! ```
//! use shear_js::{JsOptions, minify};
//!
//! let out = minify("var a = 1 ;\n var b = 2;", &JsOptions::default()).unwrap();
//! assert_eq!(out, "var a=1;var b=2");
//! ```
//!
//! # Implemented
//!
//! - Comment removal (legal `/*! ... */` comments survive)
//! - Whitespace and trailing semicolon removal
//! - Optional AST compression (`JsOptions::compress`)
//! - `</script` escaping in literals and operator positions
//!
//! # Not Implemented
//!
//! - Identifier mangling

mod inline;
mod print;

use boa_engine::{Context, Module, Script, Source};
use thiserror::Error;

/// Options for [`minify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct JsOptions {
    /// Parse with Boa first and reject scripts it cannot parse.
    pub validate: bool,
    /// Parse as an ES module instead of a classic script.
    pub module: bool,
    /// Run the oxc compressor before printing.
    pub compress: bool,
    /// Prefer `'` over `"` when both need the same escaping.
    pub single_quote: bool,
}

impl Default for JsOptions {
    fn default() -> Self {
        Self {
            validate: true,
            module: false,
            compress: false,
            single_quote: false,
        }
    }
}

/// Why a script could not be minified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsError {
    /// Boa or oxc rejected the script.
    #[error("syntax error: {0}")]
    Syntax(String),
}

/// Minify a script.
///
/// # Errors
///
/// Returns [`JsError::Syntax`] if the script does not parse.
pub fn minify(source: &str, options: &JsOptions) -> Result<String, JsError> {
    if options.validate {
        validate(source, options.module)?;
    }
    let printed = print::print(source, options)?;
    inline::escape_script_closers(printed, options.module)
}

/// Check that `source` parses, without running it.
///
/// # Errors
///
/// Returns [`JsError::Syntax`] with Boa's message.
pub fn validate(source: &str, module: bool) -> Result<(), JsError> {
    let mut context = Context::default();
    let parsed = if module {
        Module::parse(Source::from_bytes(source), None, &mut context).map(|_| ())
    } else {
        Script::parse(Source::from_bytes(source), None, &mut context).map(|_| ())
    };
    parsed.map_err(|error| JsError::Syntax(error.to_string()))
}
