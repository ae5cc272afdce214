use crate::error::{BasicError, ErrorReason, Span};
use tracing::trace;
use unicode_general_category::{get_general_category, GeneralCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Keyword,
    Variable,
    Number,
    String,
    Literal,
    Operator,
    Eol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// Matched text. String tokens hold the contents without the quotes.
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }
}

/// Outcome of a single scan attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Failure,
    Success(Token),
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success(_))
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            MatchResult::Success(token) => Some(token),
            MatchResult::Failure => None,
        }
    }

    pub fn into_token(self) -> Option<Token> {
        match self {
            MatchResult::Success(token) => Some(token),
            MatchResult::Failure => None,
        }
    }
}

/// Pull-based scanner over one line of source.
///
/// Every matcher skips leading whitespace and then tries to recognise one
/// lexical category at the cursor. A failed match leaves the cursor where it
/// was, so the caller can try a different matcher at the same position.
pub struct Scanner<'a> {
    line: &'a str,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Offset at which the next token would start.
    pub fn peek_position(&self) -> usize {
        self.skip_whitespace()
    }

    pub fn match_keyword(&mut self) -> MatchResult {
        let start = self.skip_whitespace();
        match self.char_at(start) {
            Some(c) if is_letter(c) => {}
            _ => return MatchResult::Failure,
        }

        let end = self.scan_while(start, is_letter);
        self.accept(TokenType::Keyword, start, end)
    }

    pub fn match_variable(&mut self) -> MatchResult {
        let start = self.skip_whitespace();
        let first = match self.char_at(start) {
            Some(c) if is_letter(c) => c,
            _ => return MatchResult::Failure,
        };

        // the first character is a letter, the rest may be letters or digits
        let end = self.scan_while(start + first.len_utf8(), |c| {
            is_letter(c) || c.is_ascii_digit()
        });
        self.accept(TokenType::Variable, start, end)
    }

    pub fn match_number(&mut self) -> MatchResult {
        let start = self.skip_whitespace();
        match self.char_at(start) {
            Some(c) if c.is_ascii_digit() => {}
            _ => return MatchResult::Failure,
        }

        let end = self.scan_while(start, |c| c.is_ascii_digit());
        self.accept(TokenType::Number, start, end)
    }

    /// Matches a double-quoted string. Reaching the end of the line before the
    /// closing quote is fatal for the whole line.
    pub fn match_string(&mut self) -> Result<MatchResult, BasicError> {
        let quote = self.skip_whitespace();
        if self.char_at(quote) != Some('"') {
            return Ok(MatchResult::Failure);
        }

        let content_start = quote + 1;
        let content_end = match self.line[content_start..].find('"') {
            Some(offset) => content_start + offset,
            None => {
                return Err(BasicError::new_with_help(
                    ErrorReason::UnterminatedString,
                    Span::new(quote, self.line.len()),
                    "Close the string with a matching '\"' before the end of the line.".to_string(),
                ));
            }
        };

        let token = Token::new(
            TokenType::String,
            self.line[content_start..content_end].to_string(),
            Span::new(content_start, content_end),
        );
        // skip the closing quote
        self.cursor = content_end + 1;
        trace!(?token, "matched");
        Ok(MatchResult::Success(token))
    }

    pub fn match_add_or_sub(&mut self) -> MatchResult {
        self.match_operator(&["+", "-"])
    }

    pub fn match_mul_or_div(&mut self) -> MatchResult {
        self.match_operator(&["*", "/"])
    }

    /// Matches the exact `text` at the cursor.
    pub fn match_literal(&mut self, text: &str) -> MatchResult {
        let start = self.skip_whitespace();
        if !self.line[start..].starts_with(text) {
            return MatchResult::Failure;
        }

        self.accept(TokenType::Literal, start, start + text.len())
    }

    pub fn match_eol(&mut self) -> MatchResult {
        let end = self.skip_whitespace();
        if end < self.line.len() {
            return MatchResult::Failure;
        }

        self.cursor = end;
        MatchResult::Success(Token::new(TokenType::Eol, String::new(), Span::new(end, end)))
    }

    fn match_operator(&mut self, operators: &[&str]) -> MatchResult {
        for op in operators {
            if let MatchResult::Success(token) = self.match_literal(op) {
                return MatchResult::Success(Token {
                    token_type: TokenType::Operator,
                    ..token
                });
            }
        }
        MatchResult::Failure
    }

    fn accept(&mut self, token_type: TokenType, start: usize, end: usize) -> MatchResult {
        let token = Token::new(
            token_type,
            self.line[start..end].to_string(),
            Span::new(start, end),
        );
        self.cursor = end;
        trace!(?token, "matched");
        MatchResult::Success(token)
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.line[offset..].chars().next()
    }

    /// Returns the offset of the first character at or after `from` that does
    /// not satisfy `predicate`.
    fn scan_while(&self, from: usize, predicate: impl Fn(char) -> bool) -> usize {
        self.line[from..]
            .char_indices()
            .find(|(_, c)| !predicate(*c))
            .map_or(self.line.len(), |(offset, _)| from + offset)
    }

    fn skip_whitespace(&self) -> usize {
        self.scan_while(self.cursor, is_space)
    }
}

/// Letters are general category L. Letter numbers such as `ⅰ` and combining
/// marks are not letters.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Unicode white space plus the byte order mark, minus NEL (U+0085).
fn is_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}
