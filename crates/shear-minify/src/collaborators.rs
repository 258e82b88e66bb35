//! Style and script minifiers the rewriter delegates to.
//!
//! The rewriter only sees these traits. [`CssMinifier`] and [`JsMinifier`]
//! are the defaults; a caller with a better minifier can pass its own to
//! [`Minifier::with_collaborators`](crate::Minifier::with_collaborators).

use shear_js::{JsError, JsOptions};

/// Shortens a style sheet or a wrapped declaration list.
pub trait StyleMinifier {
    /// Return an equivalent, shorter style sheet. Cannot fail.
    fn minify_stylesheet(&self, source: &str) -> String;
}

/// Shortens a script.
pub trait ScriptMinifier {
    /// Return an equivalent, shorter script.
    ///
    /// # Errors
    ///
    /// Returns a [`JsError`] if the script cannot be minified safely.
    fn minify_script(&self, source: &str, options: &JsOptions) -> Result<String, JsError>;
}

/// Default style minifier, backed by `shear-css`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssMinifier;

impl StyleMinifier for CssMinifier {
    fn minify_stylesheet(&self, source: &str) -> String {
        shear_css::minify(source)
    }
}

/// Default script minifier, backed by `shear-js`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsMinifier;

impl ScriptMinifier for JsMinifier {
    fn minify_script(&self, source: &str, options: &JsOptions) -> Result<String, JsError> {
        shear_js::minify(source, options)
    }
}
