//! Minification options.
//!
//! Options are resolved once per run: caller values are laid over the
//! defaults below and never change afterwards. Keys are camelCase so a
//! configuration file reads the same as the option names in documentation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which rewrites a run applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Leave inline elements open around block elements. Off enables the
    /// legacy rule that a new start tag closes open inline elements.
    pub html5: bool,
    /// Keep tag and attribute names as authored. Off lower-cases them.
    pub case_sensitive: bool,
    /// Drop comments, except those starting with `!` and conditional ones.
    pub remove_comments: bool,
    /// Drop `<% %>` and `<? ?>` blocks.
    pub remove_ignored: bool,
    /// Leave out end tags the parser can infer.
    pub remove_optional_tags: bool,
    /// Trim and collapse whitespace in text.
    pub collapse_whitespace: bool,
    /// Minify `<style>` bodies.
    pub cssmin: bool,
    /// Minify `<script>` bodies.
    pub jsmin: bool,
    /// Drop attributes whose value is the element's default.
    pub remove_redundant_attributes: bool,
    /// Drop attributes whose value is blank.
    pub remove_empty_attributes: bool,
    /// Write `disabled="disabled"` as `disabled`.
    pub collapse_boolean_attributes: bool,
    /// Minify `style` and `on*` values, collapse `class`, trim values.
    pub clean_attributes: bool,
    /// Replace any doctype with `<!DOCTYPE html>`.
    pub use_short_doctype: bool,
    /// Drop `type="text/javascript"` from `<script>`.
    pub remove_script_type_attributes: bool,
    /// Drop `type="text/css"` from `<style>` and `<link>`.
    pub remove_style_link_type_attributes: bool,
    /// Strip a `<!-- ... -->` wrapper around script and style bodies.
    #[serde(rename = "removeCommentsFromCDATA")]
    pub remove_comments_from_cdata: bool,
    /// Strip `<![CDATA[ ... ]]>` wrappers around script and style bodies.
    #[serde(rename = "removeCDATASectionsFromCDATA")]
    pub remove_cdata_sections_from_cdata: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            html5: true,
            case_sensitive: true,
            remove_comments: true,
            remove_ignored: false,
            remove_optional_tags: false,
            collapse_whitespace: false,
            cssmin: true,
            jsmin: true,
            remove_redundant_attributes: true,
            remove_empty_attributes: true,
            collapse_boolean_attributes: true,
            clean_attributes: true,
            use_short_doctype: false,
            remove_script_type_attributes: false,
            remove_style_link_type_attributes: false,
            remove_comments_from_cdata: false,
            remove_cdata_sections_from_cdata: false,
        }
    }
}

impl Options {
    /// Parse options from a JSON object. Missing keys keep their defaults and
    /// unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if `json` is not an object of booleans.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let options = Options::from_json(r#"{"collapseWhitespace": true}"#).unwrap();
        assert!(options.collapse_whitespace);
        assert!(options.remove_comments);
        assert!(!options.remove_ignored);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options = Options::from_json(r#"{"removeAttributeQuotes": true}"#).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_cdata_key_spelling() {
        let options = Options::from_json(
            r#"{"removeCommentsFromCDATA": true, "removeCDATASectionsFromCDATA": true}"#,
        )
        .unwrap();
        assert!(options.remove_comments_from_cdata);
        assert!(options.remove_cdata_sections_from_cdata);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(Options::from_json(r#"{"html5": "yes"}"#).is_err());
    }
}
