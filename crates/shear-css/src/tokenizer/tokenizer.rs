use super::token::{CssToken, HashType, NumericType, TokenKind};

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// Span-preserving CSS tokenizer. The token rules follow CSS Syntax Level 3;
/// instead of building values, every token records the source slice it
/// consumed.
pub struct CssTokenizer<'a> {
    /// The input being tokenized
    input: &'a str,
    /// Input code points with their byte offsets
    chars: Vec<(usize, char)>,
    /// Current position, as an index into `chars`
    position: usize,
    /// Collected tokens
    tokens: Vec<CssToken<'a>>,
}

impl<'a> CssTokenizer<'a> {
    /// Create a new CSS tokenizer with the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input.
    pub fn run(&mut self) {
        loop {
            let start = self.byte_offset();
            let Some(kind) = self.consume_token() else {
                break;
            };
            let raw = &self.input[start..self.byte_offset()];
            self.tokens.push(CssToken { kind, raw });
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<CssToken<'a>> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[CssToken<'a>] {
        &self.tokens
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// Returns `None` at end of input.
    fn consume_token(&mut self) -> Option<TokenKind> {
        if self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            self.consume_comment();
            return Some(TokenKind::Comment);
        }

        let c = self.consume()?;
        let kind = match c {
            c if is_whitespace(c) => {
                self.consume_whitespace();
                TokenKind::Whitespace
            }

            '"' | '\'' => self.consume_string_token(c),

            '#' => {
                // "If the next input code point is an ident code point or the
                // next two input code points are a valid escape..."
                if self.peek().is_some_and(is_ident_code_point)
                    || is_valid_escape(self.peek(), self.peek_at(1))
                {
                    let hash_type = if self.would_start_ident_sequence() {
                        HashType::Id
                    } else {
                        HashType::Unrestricted
                    };
                    self.consume_ident_sequence();
                    TokenKind::Hash(hash_type)
                } else {
                    TokenKind::Delim('#')
                }
            }

            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,

            '+' | '.' => {
                if self.would_start_number_with(Some(c)) {
                    self.reconsume();
                    self.consume_numeric_token()
                } else {
                    TokenKind::Delim(c)
                }
            }

            '-' => {
                if self.would_start_number_with(Some('-')) {
                    self.reconsume();
                    self.consume_numeric_token()
                } else if self.peek() == Some('-') && self.peek_at(1) == Some('>') {
                    self.position += 2;
                    TokenKind::Cdc
                } else if self.would_start_ident_sequence_after_hyphen() {
                    self.reconsume();
                    self.consume_ident_like_token()
                } else {
                    TokenKind::Delim('-')
                }
            }

            '<' => {
                // "If the next 3 input code points are U+0021 U+002D U+002D (!--)..."
                if self.peek() == Some('!')
                    && self.peek_at(1) == Some('-')
                    && self.peek_at(2) == Some('-')
                {
                    self.position += 3;
                    TokenKind::Cdo
                } else {
                    TokenKind::Delim('<')
                }
            }

            '@' => {
                if self.would_start_ident_sequence() {
                    self.consume_ident_sequence();
                    TokenKind::AtKeyword
                } else {
                    TokenKind::Delim('@')
                }
            }

            '\\' => {
                if is_valid_escape(Some('\\'), self.peek()) {
                    self.reconsume();
                    self.consume_ident_like_token()
                } else {
                    TokenKind::Delim('\\')
                }
            }

            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric_token()
            }

            c if is_ident_start_code_point(c) => {
                self.reconsume();
                self.consume_ident_like_token()
            }

            c => TokenKind::Delim(c),
        };
        Some(kind)
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// Consumes one comment, up to and including `*/` or to EOF.
    fn consume_comment(&mut self) {
        self.position += 2;
        loop {
            match self.consume() {
                Some('*') if self.peek() == Some('/') => {
                    self.position += 1;
                    return;
                }
                Some(_) => {}
                None => return,
            }
        }
    }

    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.position += 1;
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string_token(&mut self, ending_code_point: char) -> TokenKind {
        loop {
            match self.consume() {
                Some(c) if c == ending_code_point => return TokenKind::String,
                // "EOF: This is a parse error. Return the <string-token>."
                None => return TokenKind::String,
                // "newline: This is a parse error. Reconsume the current input
                // code point, create a <bad-string-token>, and return it."
                Some('\n') => {
                    self.reconsume();
                    return TokenKind::BadString;
                }
                Some('\\') => {
                    if self.peek().is_some() {
                        self.position += 1;
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.5 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> TokenKind {
        let number_start = self.byte_offset();
        let (value, numeric_type) = self.consume_number();
        let number_len = self.byte_offset() - number_start;

        if self.would_start_ident_sequence() {
            self.consume_ident_sequence();
            TokenKind::Dimension {
                value,
                numeric_type,
                number_len,
            }
        } else if self.peek() == Some('%') {
            self.position += 1;
            TokenKind::Percentage {
                value,
                numeric_type,
            }
        } else {
            TokenKind::Number {
                value,
                numeric_type,
            }
        }
    }

    /// [§ 4.3.6 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> TokenKind {
        let start = self.byte_offset();
        self.consume_ident_sequence();
        let is_url = self.input[start..self.byte_offset()].eq_ignore_ascii_case("url");

        if self.peek() != Some('(') {
            return TokenKind::Ident;
        }
        self.position += 1;

        if is_url {
            // A quoted url is a function; the whitespace before the quote
            // stays outside the function token.
            let before_whitespace = self.position;
            self.consume_whitespace();
            if matches!(self.peek(), Some('"' | '\'')) {
                self.position = before_whitespace;
                return TokenKind::Function;
            }
            return self.consume_url_token();
        }
        TokenKind::Function
    }

    /// [§ 4.3.7 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    fn consume_url_token(&mut self) -> TokenKind {
        loop {
            match self.consume() {
                Some(')') | None => return TokenKind::Url,
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    return match self.peek() {
                        Some(')') => {
                            self.position += 1;
                            TokenKind::Url
                        }
                        None => TokenKind::Url,
                        _ => {
                            self.consume_bad_url_remnants();
                            TokenKind::BadUrl
                        }
                    };
                }
                Some('"' | '\'' | '(') => {
                    self.consume_bad_url_remnants();
                    return TokenKind::BadUrl;
                }
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.peek()) {
                        self.consume_escaped_code_point();
                    } else {
                        self.consume_bad_url_remnants();
                        return TokenKind::BadUrl;
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.14 Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.consume() {
                Some(')') | None => return,
                Some('\\') if is_valid_escape(Some('\\'), self.peek()) => {
                    self.consume_escaped_code_point();
                }
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) {
        loop {
            match self.peek() {
                Some(c) if is_ident_code_point(c) => self.position += 1,
                Some('\\') if is_valid_escape(Some('\\'), self.peek_at(1)) => {
                    self.position += 1;
                    self.consume_escaped_code_point();
                }
                _ => return,
            }
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> (f64, NumericType) {
        let start = self.byte_offset();
        let mut numeric_type = NumericType::Integer;

        if matches!(self.peek(), Some('+' | '-')) {
            self.position += 1;
        }
        self.consume_digits();

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.position += 1;
            self.consume_digits();
            numeric_type = NumericType::Number;
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let has_sign = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_offset = if has_sign { 2 } else { 1 };
            if self
                .peek_at(digit_offset)
                .is_some_and(|c| c.is_ascii_digit())
            {
                self.position += digit_offset;
                self.consume_digits();
                numeric_type = NumericType::Number;
            }
        }

        let repr = &self.input[start..self.byte_offset()];
        (repr.parse().unwrap_or(0.0), numeric_type)
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.position += 1;
        }
    }

    /// [§ 4.3.13 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called after the backslash. Only advances; escapes are never decoded.
    fn consume_escaped_code_point(&mut self) {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                // "Consume as many hex digits as possible, but no more than 5."
                for _ in 0..5 {
                    if !self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        break;
                    }
                    self.position += 1;
                }
                if self.peek().is_some_and(is_whitespace) {
                    self.position += 1;
                }
            }
            _ => {}
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident_sequence(&self) -> bool {
        match self.peek() {
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(|c| is_ident_start_code_point(c) || c == '-')
                    || is_valid_escape(second, self.peek_at(2))
            }
            Some(c) if is_ident_start_code_point(c) => true,
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(1)),
            _ => false,
        }
    }

    /// The same check with a leading `-` already consumed.
    fn would_start_ident_sequence_after_hyphen(&self) -> bool {
        let second = self.peek();
        second.is_some_and(|c| is_ident_start_code_point(c) || c == '-')
            || is_valid_escape(second, self.peek_at(1))
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    ///
    /// `first` has already been consumed.
    fn would_start_number_with(&self, first: Option<char>) -> bool {
        let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
        match first {
            Some('+' | '-') => {
                is_digit(self.peek()) || (self.peek() == Some('.') && is_digit(self.peek_at(1)))
            }
            Some('.') => is_digit(self.peek()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    // =========================================================================
    // Input helpers
    // =========================================================================

    fn byte_offset(&self) -> usize {
        self.chars
            .get(self.position)
            .map_or(self.input.len(), |&(offset, _)| offset)
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    fn reconsume(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).map(|&(_, c)| c)
    }
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second != Some('\n')
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
const fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}
