//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! Unlike a parser's tokens these never decode anything: each token keeps the
//! exact slice of source it was read from, so re-serializing every token in
//! order reproduces the input byte for byte. The minifier only drops or
//! rewrites the tokens it understands.

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<hash-token>` with the type flag set to 'id'... or 'unrestricted'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// The value is a valid identifier.
    Id,
    /// The value is not a valid identifier, e.g. `#0af`.
    Unrestricted,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<number-token>` has a type flag set to either 'integer' or 'number'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    /// No decimal point or exponent.
    Integer,
    /// Has a decimal point or exponent.
    Number,
}

/// What a token is. The text lives on [`CssToken::raw`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// `<ident-token>`
    Ident,
    /// `<function-token>`, raw text includes the `(`
    Function,
    /// `<at-keyword-token>`, raw text includes the `@`
    AtKeyword,
    /// `<hash-token>`, raw text includes the `#`
    Hash(HashType),
    /// `<string-token>`, raw text includes the quotes
    String,
    /// `<bad-string-token>`
    BadString,
    /// `<url-token>`, raw text is the whole `url(...)`
    Url,
    /// `<bad-url-token>`
    BadUrl,
    /// `<delim-token>`
    Delim(char),
    /// `<number-token>`
    Number {
        /// Numeric value.
        value: f64,
        /// Integer or number.
        numeric_type: NumericType,
    },
    /// `<percentage-token>`
    Percentage {
        /// Numeric value.
        value: f64,
        /// Integer or number.
        numeric_type: NumericType,
    },
    /// `<dimension-token>`
    Dimension {
        /// Numeric value.
        value: f64,
        /// Integer or number.
        numeric_type: NumericType,
        /// Byte length of the numeric part of the raw text; the unit follows.
        number_len: usize,
    },
    /// `<whitespace-token>`
    Whitespace,
    /// `/* ... */`, delimiters included
    Comment,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
}

/// A token and the source text it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssToken<'a> {
    /// Token type and parsed numeric data.
    pub kind: TokenKind,
    /// Exact source text.
    pub raw: &'a str,
}

impl<'a> CssToken<'a> {
    /// Whether this is whitespace or a comment, i.e. carries no syntax.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Whether this is a `/*! ... */` comment that must be preserved.
    #[must_use]
    pub fn is_preserved_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment) && self.raw.starts_with("/*!")
    }

    /// Numeric part of a dimension, e.g. `0.5` in `0.5em`.
    #[must_use]
    pub fn dimension_number(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Dimension { number_len, .. } => self.raw.get(..number_len),
            _ => None,
        }
    }

    /// Unit of a dimension, e.g. `em` in `0.5em`.
    #[must_use]
    pub fn dimension_unit(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Dimension { number_len, .. } => self.raw.get(number_len..),
            _ => None,
        }
    }

    /// Function name without the `(`.
    #[must_use]
    pub fn function_name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Function => self.raw.strip_suffix('('),
            _ => None,
        }
    }
}
