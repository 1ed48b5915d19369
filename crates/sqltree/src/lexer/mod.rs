//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQL that produces a stream of tokens,
//! and [`tokenize`], which drains a lexer into the token list the parser consumes.

mod token;
mod tokenizer;

pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;

/// Tokenizes the entire input.
///
/// The result is never empty: its last element is an `Eof` token when the
/// whole input was scanned, or an `Error` token describing the first
/// lexical error.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_ends_with_eof() {
        let tokens = tokenize("SELECT a FROM t");
        assert_eq!(tokens.len(), 5);
        assert!(tokens.last().is_some_and(Token::is_eof));
    }

    #[test]
    fn test_tokenize_ends_with_error() {
        let tokens = tokenize("SELECT a FROM t WHERE b = 'x");
        assert!(tokens.last().is_some_and(Token::is_error));
        assert_eq!(tokens.iter().filter(|t| t.kind.is_terminal()).count(), 1);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }
}
