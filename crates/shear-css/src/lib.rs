//! CSS minification for the shear minifier.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types, each carrying the exact source text it was read from
//!   - Comments kept as tokens so `/*! ... */` notices can survive
//!
//! - **Stylesheet minifier**
//!   - Whitespace removal that respects selector combinators and `calc()`
//!   - Comment removal, trailing semicolon removal
//!   - Value shortening: colors, `font-weight`, zero lengths, leading zeros
//!
//! # Not Implemented
//!
//! - Rule merging or reordering
//! - Shorthand property folding
//!
//! # Example
//!
//! ```
//! assert_eq!(shear_css::minify("p { color : #FFFFFF ; }"), "p{color:#fff}");
//! ```

/// Color shortening.
pub mod color;
/// Token-level stylesheet minifier.
pub mod minify;
/// CSS tokenizer.
pub mod tokenizer;

pub use minify::minify;
pub use tokenizer::{CssToken, CssTokenizer, HashType, NumericType, TokenKind};
