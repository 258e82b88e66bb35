//! Token-level stylesheet minifier.
//!
//! The minifier walks the token stream once. It tracks just enough structure
//! to know whether it is inside a selector, an at-rule prelude, or a
//! declaration, because the same whitespace means different things in each:
//! `a :hover` and `a:hover` select different elements, while `color : red`
//! and `color:red` are the same declaration.

use crate::color::{Rgb, shorten_hex};
use crate::tokenizer::{CssToken, CssTokenizer, HashType, NumericType, TokenKind};

/// Length units for which a zero value can drop its unit.
const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "ch", "pt", "pc", "in", "cm", "mm", "q", "vw", "vh", "vmin", "vmax",
];

/// Minify a stylesheet, or a sequence of declarations wrapped in a rule.
///
/// Never fails: input the tokenizer cannot make sense of is passed through.
#[must_use]
pub fn minify(source: &str) -> String {
    let mut tokenizer = CssTokenizer::new(source);
    tokenizer.run();
    let tokens = tokenizer.into_tokens();
    let mut minifier = Minifier::new(&tokens);
    minifier.run();
    minifier.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// A selector list, before `{`.
    Selector,
    /// Between an at-keyword and its `{` or `;`.
    AtPrelude,
    /// Inside a declaration block; `in_value` once the property's `:` is seen.
    Declaration { in_value: bool },
}

struct Minifier<'t, 'a> {
    tokens: &'t [CssToken<'a>],
    out: String,
    /// Kind of the last token written to `out`.
    last: Option<TokenKind>,
    /// Whitespace or a dropped comment was seen since `last`.
    pending_space: bool,
    at_statement_start: bool,
    context: Context,
    /// Lower-cased name of the property whose value is being written.
    property: String,
    block_depth: usize,
    paren_depth: usize,
}

impl<'t, 'a> Minifier<'t, 'a> {
    const fn new(tokens: &'t [CssToken<'a>]) -> Self {
        Self {
            tokens,
            out: String::new(),
            last: None,
            pending_space: false,
            at_statement_start: true,
            context: Context::Selector,
            property: String::new(),
            block_depth: 0,
            paren_depth: 0,
        }
    }

    fn run(&mut self) {
        let mut index = 0;
        while let Some(&token) = self.tokens.get(index) {
            index = self.process(index, token) + 1;
        }
    }

    fn finish(mut self) -> String {
        if self.out.ends_with(';') {
            let _ = self.out.pop();
        }
        self.out
    }

    /// Handle the token at `index`, returning the index of the last token
    /// consumed (more than one when a whole `rgb()` is folded).
    fn process(&mut self, index: usize, token: CssToken<'a>) -> usize {
        if token.is_trivia() && !token.is_preserved_comment() {
            self.pending_space = true;
            return index;
        }

        if self.at_statement_start {
            self.begin_statement(index, token);
        }

        match token.kind {
            TokenKind::LeftBrace => {
                self.block_depth += 1;
                self.emit(token.kind, "{");
                self.at_statement_start = true;
            }
            TokenKind::RightBrace => {
                if self.last == Some(TokenKind::Semicolon) {
                    let _ = self.out.pop();
                    self.last = None;
                }
                self.block_depth = self.block_depth.saturating_sub(1);
                self.emit(token.kind, "}");
                self.at_statement_start = true;
            }
            TokenKind::Semicolon => {
                let empty_statement = matches!(
                    self.last,
                    None | Some(TokenKind::Semicolon | TokenKind::LeftBrace)
                );
                if !empty_statement {
                    self.emit(token.kind, ";");
                }
                if self.paren_depth == 0 {
                    self.at_statement_start = true;
                }
            }
            TokenKind::Colon => {
                if self.context == (Context::Declaration { in_value: false })
                    && self.paren_depth == 0
                {
                    self.context = Context::Declaration { in_value: true };
                }
                self.emit(token.kind, ":");
            }
            TokenKind::Function => {
                if self.in_value() {
                    if let Some((rgb, close)) = self.fold_rgb(index, token) {
                        self.emit(TokenKind::Hash(HashType::Unrestricted), &rgb.to_hex());
                        return close;
                    }
                }
                self.paren_depth += 1;
                self.emit(token.kind, token.raw);
            }
            TokenKind::LeftParen | TokenKind::LeftBracket => {
                self.paren_depth += 1;
                self.emit(token.kind, token.raw);
            }
            TokenKind::RightParen | TokenKind::RightBracket => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                self.emit(token.kind, token.raw);
            }
            _ if self.in_value() => {
                let shortened = self.shorten_value(token);
                self.emit(token.kind, shortened.as_deref().unwrap_or(token.raw));
            }
            _ => self.emit(token.kind, token.raw),
        }
        index
    }

    /// Decide what kind of statement starts at `index`.
    fn begin_statement(&mut self, index: usize, token: CssToken<'a>) {
        self.at_statement_start = false;
        self.property.clear();
        self.context = if matches!(token.kind, TokenKind::AtKeyword) {
            Context::AtPrelude
        } else if self.block_depth == 0 || self.opens_block(index) {
            Context::Selector
        } else {
            if matches!(token.kind, TokenKind::Ident) {
                self.property = token.raw.to_ascii_lowercase();
            }
            Context::Declaration { in_value: false }
        };
    }

    /// Whether the statement starting at `index` reaches a `{` before a `;`
    /// or `}`, i.e. is a nested rule rather than a declaration.
    fn opens_block(&self, index: usize) -> bool {
        let mut depth = 0usize;
        for token in &self.tokens[index..] {
            match token.kind {
                TokenKind::Function | TokenKind::LeftParen | TokenKind::LeftBracket => depth += 1,
                TokenKind::RightParen | TokenKind::RightBracket => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::LeftBrace if depth == 0 => return true,
                TokenKind::Semicolon | TokenKind::RightBrace if depth == 0 => return false,
                _ => {}
            }
        }
        false
    }

    const fn in_value(&self) -> bool {
        matches!(self.context, Context::Declaration { in_value: true })
    }

    // =========================================================================
    // Value shortening
    // =========================================================================

    /// A shorter spelling of a declaration-value token, if there is one.
    fn shorten_value(&self, token: CssToken<'a>) -> Option<String> {
        match token.kind {
            TokenKind::Hash(_) => Some(shorten_hex(token.raw)),
            TokenKind::Ident if self.paren_depth == 0 => {
                if self.property == "font-weight" {
                    return match token.raw.to_ascii_lowercase().as_str() {
                        "bold" => Some("700".to_string()),
                        "normal" => Some("400".to_string()),
                        _ => None,
                    };
                }
                if is_color_property(&self.property) {
                    return Rgb::from_named(token.raw).map(Rgb::to_hex);
                }
                None
            }
            TokenKind::Dimension { .. }
                if self.paren_depth == 0
                    && token.dimension_number().is_some_and(is_zero)
                    && token.dimension_unit().is_some_and(is_length_unit) =>
            {
                Some("0".to_string())
            }
            TokenKind::Dimension { .. } => {
                let number = token.dimension_number()?;
                let unit = token.dimension_unit()?;
                strip_leading_zero(number).map(|number| format!("{number}{unit}"))
            }
            TokenKind::Number { .. } | TokenKind::Percentage { .. } => {
                strip_leading_zero(token.raw)
            }
            _ => None,
        }
    }

    /// Fold `rgb(r, g, b)` with integer channels into a hex color. Returns the
    /// color and the index of the closing `)`.
    fn fold_rgb(&self, index: usize, token: CssToken<'a>) -> Option<(Rgb, usize)> {
        if !token.function_name()?.eq_ignore_ascii_case("rgb") {
            return None;
        }
        let mut channels = Vec::with_capacity(3);
        let mut expect_channel = true;
        for (offset, next) in self.tokens[index + 1..].iter().enumerate() {
            match next.kind {
                TokenKind::Whitespace | TokenKind::Comment => {}
                TokenKind::Number {
                    numeric_type: NumericType::Integer,
                    ..
                } if expect_channel => {
                    channels.push(next.raw.parse::<u8>().ok()?);
                    expect_channel = false;
                }
                TokenKind::Comma if !expect_channel && channels.len() < 3 => {
                    expect_channel = true;
                }
                TokenKind::RightParen if !expect_channel && channels.len() == 3 => {
                    let rgb = Rgb {
                        r: channels[0],
                        g: channels[1],
                        b: channels[2],
                    };
                    return Some((rgb, index + 1 + offset));
                }
                _ => return None,
            }
        }
        None
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn emit(&mut self, kind: TokenKind, text: &str) {
        if self.pending_space {
            if let Some(last) = self.last {
                if self.keeps_space(last, kind) {
                    self.out.push(' ');
                }
            }
        }
        self.out.push_str(text);
        self.last = Some(kind);
        self.pending_space = false;
    }

    /// Whether whitespace between `prev` and `next` is significant.
    fn keeps_space(&self, prev: TokenKind, next: TokenKind) -> bool {
        use TokenKind::{
            Cdc, Cdo, Colon, Comma, Delim, Function, LeftBrace, LeftParen, RightBrace, RightParen,
            Semicolon,
        };

        if matches!(prev, Cdo | Cdc) || matches!(next, Cdo | Cdc) {
            return true;
        }
        if matches!(prev, LeftBrace | RightBrace | Semicolon | Comma | LeftParen | Function)
            || matches!(next, LeftBrace | RightBrace | Semicolon | Comma | RightParen)
        {
            return false;
        }
        match self.context {
            Context::Declaration { .. } => {
                !(matches!(prev, Colon | Delim('!')) || matches!(next, Colon | Delim('!')))
            }
            Context::Selector => {
                let combinator = |kind| matches!(kind, Delim('>' | '+' | '~'));
                !(combinator(prev) || combinator(next) || prev == Colon)
            }
            Context::AtPrelude => {
                !(self.paren_depth > 0 && (prev == Colon || next == Colon))
            }
        }
    }
}

fn is_length_unit(unit: &str) -> bool {
    LENGTH_UNITS
        .iter()
        .any(|length| length.eq_ignore_ascii_case(unit))
}

fn is_color_property(property: &str) -> bool {
    property.ends_with("color")
        || property.starts_with("border")
        || property.starts_with("outline")
        || matches!(
            property,
            "background" | "fill" | "stroke" | "box-shadow" | "text-shadow" | "column-rule"
        )
}

/// `0.5` to `.5`, `-0.5` to `-.5`.
fn strip_leading_zero(number: &str) -> Option<String> {
    let (sign, digits) = match number.as_bytes().first()? {
        b'+' | b'-' => number.split_at(1),
        _ => ("", number),
    };
    let fraction = digits.strip_prefix("0.")?;
    Some(format!("{sign}.{fraction}"))
}

/// Whether a numeric literal is zero, in any spelling (`0`, `-0`, `0.00`).
fn is_zero(number: &str) -> bool {
    number
        .trim_start_matches(['+', '-'])
        .bytes()
        .all(|b| b == b'0' || b == b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_leading_zero() {
        assert_eq!(strip_leading_zero("0.5").as_deref(), Some(".5"));
        assert_eq!(strip_leading_zero("-0.25").as_deref(), Some("-.25"));
        assert_eq!(strip_leading_zero("10.5"), None);
        assert_eq!(strip_leading_zero("0"), None);
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero("0"));
        assert!(is_zero("-0.00"));
        assert!(!is_zero("0.5"));
    }

    #[test]
    fn test_color_properties() {
        assert!(is_color_property("background-color"));
        assert!(is_color_property("border-left"));
        assert!(!is_color_property("font-family"));
    }
}
