//! SQL Tokenizer implementation.

use tracing::trace;

use super::{Token, TokenKind};

const DECIMAL_DIGITS: &str = "0123456789";
const HEX_DIGITS: &str = "0123456789abcdefABCDEF";

/// Single-word keywords, matched case-insensitively when followed by
/// whitespace, a symbol, or the end of input.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("select", TokenKind::Select),
    ("from", TokenKind::From),
    ("where", TokenKind::Where),
    ("having", TokenKind::Having),
    ("union", TokenKind::Union),
    ("join", TokenKind::Join),
    ("on", TokenKind::On),
    ("limit", TokenKind::Limit),
    ("offset", TokenKind::Offset),
    ("as", TokenKind::As),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("asc", TokenKind::Asc),
    ("desc", TokenKind::Desc),
    ("between", TokenKind::Between),
    ("like", TokenKind::Like),
    ("in", TokenKind::In),
    ("create", TokenKind::Create),
    ("table", TokenKind::Table),
    ("view", TokenKind::View),
    ("drop", TokenKind::Drop),
];

/// Two-word keywords emitted as one token.
const COMPOUND_KEYWORDS: &[(&str, &str, TokenKind)] = &[
    ("group", "by", TokenKind::GroupBy),
    ("order", "by", TokenKind::OrderBy),
    ("inner", "join", TokenKind::InnerJoin),
    ("outer", "join", TokenKind::OuterJoin),
    ("left", "join", TokenKind::LeftJoin),
    ("right", "join", TokenKind::RightJoin),
];

/// Function names, recognized only when directly followed by `(`.
const FUNCTIONS: &[(&str, TokenKind)] = &[
    ("sum", TokenKind::Sum),
    ("min", TokenKind::Min),
    ("max", TokenKind::Max),
    ("avg", TokenKind::Avg),
    ("count", TokenKind::Count),
    ("greatest", TokenKind::Greatest),
];

/// Symbols, two-character forms first so the longest match wins.
const SYMBOLS: &[(&str, TokenKind)] = &[
    ("<>", TokenKind::NotEqual),
    ("!=", TokenKind::NotEqual),
    (">=", TokenKind::GreaterEqual),
    ("<=", TokenKind::LessEqual),
    ("=", TokenKind::Equal),
    (">", TokenKind::Greater),
    ("<", TokenKind::Less),
    ("?", TokenKind::Question),
    ("%", TokenKind::Percent),
    ("*", TokenKind::Star),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("/", TokenKind::Slash),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    (".", TokenKind::Dot),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
];

fn is_symbol_start(c: char) -> bool {
    SYMBOLS.iter().any(|(symbol, _)| symbol.starts_with(c))
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A keyword ends at whitespace, a symbol, or the end of input.
fn is_word_boundary(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => c.is_whitespace() || is_symbol_start(c),
    }
}

/// A lexer that tokenizes SQL input.
///
/// The lexer is a pull-based iterator: each call to [`Iterator::next`]
/// scans exactly one token. Iteration ends after the `Eof` or `Error`
/// token has been yielded.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The byte position of the start of the pending token.
    start: usize,
    /// The current byte position.
    pos: usize,
    /// Byte width of the last rune read; zero once it has been backed up.
    width: usize,
    /// Current 1-based line.
    line: usize,
    /// Current 1-based column.
    column: usize,
    /// Column before the last rune read.
    last_column: usize,
    start_line: usize,
    start_column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            width: 0,
            line: 1,
            column: 1,
            last_column: 1,
            start_line: 1,
            start_column: 1,
            finished: false,
        }
    }

    /// Consumes the next rune.
    fn next_char(&mut self) -> Option<char> {
        let Some(c) = self.input[self.pos..].chars().next() else {
            self.width = 0;
            return None;
        };
        self.width = c.len_utf8();
        self.pos += self.width;
        self.last_column = self.column;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Steps back over the last rune read. Only one step is remembered.
    fn backup(&mut self) {
        if self.width == 0 {
            return;
        }
        self.pos -= self.width;
        if self.input[self.pos..].starts_with('\n') {
            self.line -= 1;
        }
        self.column = self.last_column;
        self.width = 0;
    }

    /// Returns the next rune without consuming it.
    fn peek(&mut self) -> Option<char> {
        let c = self.next_char();
        self.backup();
        c
    }

    /// Returns the rune `step` positions ahead (1 is the next rune).
    fn peek_ahead(&self, step: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(step.checked_sub(1)?)
    }

    /// Skips exactly `runes` runes. Leaves the lexer untouched and returns
    /// false if the input ends first.
    fn fast_forward(&mut self, runes: usize) -> bool {
        let saved = (self.pos, self.width, self.line, self.column, self.last_column);
        for _ in 0..runes {
            if self.next_char().is_none() {
                (self.pos, self.width, self.line, self.column, self.last_column) = saved;
                return false;
            }
        }
        true
    }

    /// Consumes the next rune if it is in `valid`.
    fn accept(&mut self, valid: &str) -> bool {
        match self.next_char() {
            Some(c) if valid.contains(c) => true,
            _ => {
                self.backup();
                false
            }
        }
    }

    /// Consumes a run of runes from `valid`.
    fn accept_run(&mut self, valid: &str) {
        while self.accept(valid) {}
    }

    /// Consumes a run of runes matching `pred`.
    fn accept_while(&mut self, pred: impl Fn(char) -> bool) {
        loop {
            match self.next_char() {
                Some(c) if pred(c) => {}
                _ => {
                    self.backup();
                    break;
                }
            }
        }
    }

    /// Case-insensitive test of the remaining input against an ASCII pattern.
    fn match_prefix(&self, pattern: &str) -> bool {
        self.input
            .get(self.pos..self.pos + pattern.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(pattern))
    }

    /// Discards the pending input.
    fn ignore(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    /// Flushes the pending input as a token.
    fn emit(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(
            kind,
            &self.input[self.start..self.pos],
            self.start_line,
            self.start_column,
        );
        trace!(kind = %kind, text = %token.text, line = token.line, column = token.column, "emit token");
        self.ignore();
        token
    }

    /// Builds an error token positioned at the start of the pending input.
    fn error(&self, message: String) -> Token {
        trace!(message = %message, "lexical error");
        Token::new(TokenKind::Error, message, self.start_line, self.start_column)
    }

    /// Skips `runes` runes and emits them as one token of `kind`.
    fn lex_fixed(&mut self, runes: usize, kind: TokenKind) -> Token {
        if self.fast_forward(runes) {
            self.emit(kind)
        } else {
            self.error(format!(
                "unexpected end of input while reading {kind} at line {}, column {}",
                self.start_line, self.start_column
            ))
        }
    }

    fn lex_keyword(&mut self) -> Option<Token> {
        let &(word, kind) = KEYWORDS.iter().find(|(word, _)| {
            self.match_prefix(word) && is_word_boundary(self.peek_ahead(word.len() + 1))
        })?;
        Some(self.lex_fixed(word.len(), kind))
    }

    /// Returns the rune width of `first <whitespace> second` at the current
    /// position, if present.
    fn compound_width(&self, first: &str, second: &str) -> Option<usize> {
        if !self.match_prefix(first) {
            return None;
        }
        let mut width = first.len();
        while self.peek_ahead(width + 1).is_some_and(char::is_whitespace) {
            width += 1;
        }
        if width == first.len() {
            return None;
        }
        let matches = second.chars().enumerate().all(|(i, expected)| {
            self.peek_ahead(width + 1 + i)
                .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
        });
        width += second.len();
        (matches && is_word_boundary(self.peek_ahead(width + 1))).then_some(width)
    }

    fn lex_compound_keyword(&mut self) -> Option<Token> {
        let (width, kind) = COMPOUND_KEYWORDS.iter().find_map(|&(first, second, kind)| {
            self.compound_width(first, second).map(|width| (width, kind))
        })?;
        Some(self.lex_fixed(width, kind))
    }

    fn lex_function(&mut self) -> Option<Token> {
        let &(name, kind) = FUNCTIONS.iter().find(|(name, _)| {
            self.match_prefix(name) && self.peek_ahead(name.len() + 1) == Some('(')
        })?;
        Some(self.lex_fixed(name.len(), kind))
    }

    fn lex_symbol(&mut self) -> Option<Token> {
        let &(symbol, kind) = SYMBOLS
            .iter()
            .find(|(symbol, _)| self.match_prefix(symbol))?;
        Some(self.lex_fixed(symbol.chars().count(), kind))
    }

    /// Scans a bound parameter (`:name`).
    fn lex_parameter(&mut self) -> Token {
        self.next_char();
        self.accept_while(is_identifier_char);
        self.emit(TokenKind::Parameter)
    }

    /// Scans a number: optional hex prefix, digits, fraction and exponent.
    fn lex_number(&mut self) -> Token {
        let mut digits = DECIMAL_DIGITS;
        if self.accept("0") && self.accept("xX") {
            digits = HEX_DIGITS;
            if !self.accept(digits) {
                return self.malformed_number();
            }
        }
        self.accept_run(digits);
        if self.accept(".") {
            self.accept_run(digits);
        }
        if self.accept("eE") {
            self.accept("+-");
            if !self.accept(DECIMAL_DIGITS) {
                return self.malformed_number();
            }
            self.accept_run(DECIMAL_DIGITS);
        }
        // Next thing mustn't be part of an identifier.
        if self.peek().is_some_and(is_identifier_char) {
            self.next_char();
            return self.malformed_number();
        }
        self.emit(TokenKind::Number)
    }

    fn malformed_number(&self) -> Token {
        self.error(format!(
            "malformed number literal '{}' at line {}, column {}",
            &self.input[self.start..self.pos],
            self.start_line,
            self.start_column
        ))
    }

    /// Scans a quoted string. A doubled quote inside the string is an
    /// escaped quote.
    fn lex_string(&mut self, quote: char) -> Token {
        self.next_char();
        loop {
            match self.next_char() {
                Some(c) if c == quote => {
                    if self.peek() != Some(quote) {
                        return self.emit(TokenKind::String);
                    }
                    self.next_char();
                }
                Some(_) => {}
                None => {
                    return self.error(format!(
                        "unterminated quoted string starting at line {}, column {}",
                        self.start_line, self.start_column
                    ));
                }
            }
        }
    }

    /// Scans a backtick-quoted literal.
    fn lex_quoted_literal(&mut self) -> Token {
        self.next_char();
        loop {
            match self.next_char() {
                Some('`') => return self.emit(TokenKind::Literal),
                Some(_) => {}
                None => {
                    return self.error(format!(
                        "unterminated backtick literal starting at line {}, column {}",
                        self.start_line, self.start_column
                    ));
                }
            }
        }
    }

    /// Scans a bare identifier.
    fn lex_literal(&mut self) -> Token {
        self.accept_while(is_identifier_char);
        self.emit(TokenKind::Literal)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next_char();
            self.ignore();
        }

        if let Some(token) = self.lex_keyword() {
            return token;
        }
        if let Some(token) = self.lex_compound_keyword() {
            return token;
        }
        if let Some(token) = self.lex_function() {
            return token;
        }

        let (first, second) = (self.peek_ahead(1), self.peek_ahead(2));
        match first {
            Some(':') if second.is_some_and(char::is_alphabetic) => return self.lex_parameter(),
            Some(c) if c.is_ascii_digit() => return self.lex_number(),
            Some(quote @ ('\'' | '"')) => return self.lex_string(quote),
            Some('`') => return self.lex_quoted_literal(),
            Some(c) if c.is_alphabetic() || c == '_' => return self.lex_literal(),
            _ => {}
        }

        if let Some(token) = self.lex_symbol() {
            return token;
        }

        match first {
            None => self.emit(TokenKind::Eof),
            Some(c) => self.error(format!(
                "unrecognized character {c:?} at line {}, column {}",
                self.start_line, self.start_column
            )),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind.is_terminal();
        Some(token)
    }
}
