//! Parser error types.

use core::fmt::Display;

use crate::lexer::Token;

/// Errors that can occur while turning SQL text into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The lexer could not scan the input.
    #[error("Lexical error: {message}")]
    Lex {
        /// Description of the offending input.
        message: String,
        line: usize,
        column: usize,
    },

    /// The tokens do not match the grammar.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// What was expected and what was found.
        message: String,
        line: usize,
        column: usize,
    },

    /// The input contains no tokens.
    #[error("Empty input: no SQL query found")]
    EmptyInput,

    /// Parentheses, functions or subqueries are nested too deeply.
    #[error("Nesting depth limit of {limit} exceeded at line {line}, column {column}")]
    DepthLimitExceeded {
        /// The configured maximum depth.
        limit: usize,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Creates a syntax error positioned at `token`.
    #[must_use]
    pub fn syntax(message: impl Into<String>, token: &Token) -> Self {
        Self::Syntax {
            message: message.into(),
            line: token.line,
            column: token.column,
        }
    }

    /// Creates an "expected X, found Y" syntax error.
    #[must_use]
    pub fn unexpected(expected: impl Display, found: &Token) -> Self {
        Self::syntax(
            format!("expected {expected}, found {}", found.describe()),
            found,
        )
    }

    /// Creates a lexical error from an `Error` token.
    #[must_use]
    pub fn lex(token: &Token) -> Self {
        Self::Lex {
            message: token.text.clone(),
            line: token.line,
            column: token.column,
        }
    }

    /// Returns the `(line, column)` the error points at, if any.
    #[must_use]
    pub const fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Lex { line, column, .. }
            | Self::Syntax { line, column, .. }
            | Self::DepthLimitExceeded { line, column, .. } => Some((*line, *column)),
            Self::EmptyInput => None,
        }
    }

    /// Returns true for grammar errors, including the depth limit.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::DepthLimitExceeded { .. })
    }

    /// Returns true for errors raised by the lexer.
    #[must_use]
    pub const fn is_lex(&self) -> bool {
        matches!(self, Self::Lex { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_unexpected_message() {
        let token = Token::new(TokenKind::Comma, ",", 3, 14);
        let err = ParseError::unexpected("an operand", &token);
        assert_eq!(
            err.to_string(),
            "Syntax error at line 3, column 14: expected an operand, found ','"
        );
        assert_eq!(err.position(), Some((3, 14)));
        assert!(err.is_syntax());
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let token = Token::new(TokenKind::Eof, "", 1, 9);
        let err = ParseError::unexpected(TokenKind::From, &token);
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 9: expected FROM, found end of input"
        );
    }

    #[test]
    fn test_lex_error_from_token() {
        let token = Token::new(TokenKind::Error, "unrecognized character '#'", 1, 3);
        let err = ParseError::lex(&token);
        assert!(err.is_lex());
        assert_eq!(err.position(), Some((1, 3)));
        assert_eq!(
            err.to_string(),
            "Lexical error: unrecognized character '#'"
        );
    }

    #[test]
    fn test_empty_input_has_no_position() {
        assert_eq!(ParseError::EmptyInput.position(), None);
        assert!(!ParseError::EmptyInput.is_syntax());
    }
}
