//! Token types for the SQL lexer.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Comparison operators
    /// =
    Equal,
    /// <> or !=
    NotEqual,
    /// >
    Greater,
    /// >=
    GreaterEqual,
    /// <
    Less,
    /// <=
    LessEqual,

    // Arithmetic operators and placeholders
    /// ?
    Question,
    /// %
    Percent,
    /// *
    Star,
    /// +
    Plus,
    /// -
    Minus,
    /// /
    Slash,

    // Delimiters
    /// .
    Dot,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,

    // Literals
    /// Numeric literal (e.g., 42, 3.14, 0x1F, 1e10)
    Number,
    /// Quoted string (e.g., 'hello' or "hello")
    String,
    /// Identifier, bare or backtick-quoted (e.g., name or `name`)
    Literal,
    /// Bound parameter (e.g., :name)
    Parameter,

    // Keywords
    Select,
    From,
    Where,
    GroupBy,
    OrderBy,
    Having,
    Union,
    Join,
    InnerJoin,
    OuterJoin,
    LeftJoin,
    RightJoin,
    On,
    Limit,
    Offset,
    As,
    And,
    Or,
    Not,
    Asc,
    Desc,
    Between,
    Like,
    In,
    Create,
    Table,
    View,
    Drop,

    // Function names
    Sum,
    Min,
    Max,
    Avg,
    Count,
    Greatest,

    // Special
    /// End of input
    Eof,
    /// Lexical error; the token text carries the message
    Error,
}

impl TokenKind {
    /// Returns the SQL spelling of the token kind, or a description for
    /// kinds without a fixed spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Question => "?",
            Self::Percent => "%",
            Self::Star => "*",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Slash => "/",
            Self::Dot => ".",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Number => "number",
            Self::String => "string",
            Self::Literal => "literal",
            Self::Parameter => "parameter",
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::OrderBy => "ORDER BY",
            Self::Having => "HAVING",
            Self::Union => "UNION",
            Self::Join => "JOIN",
            Self::InnerJoin => "INNER JOIN",
            Self::OuterJoin => "OUTER JOIN",
            Self::LeftJoin => "LEFT JOIN",
            Self::RightJoin => "RIGHT JOIN",
            Self::On => "ON",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::As => "AS",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Drop => "DROP",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::Greatest => "GREATEST",
            Self::Eof => "end of input",
            Self::Error => "error",
        }
    }

    /// Returns true for the join keywords, which the lexer always emits as
    /// a single token.
    #[must_use]
    pub const fn is_join(&self) -> bool {
        matches!(
            self,
            Self::Join | Self::InnerJoin | Self::OuterJoin | Self::LeftJoin | Self::RightJoin
        )
    }

    /// Returns true for aggregate and scalar function names.
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(
            self,
            Self::Sum | Self::Min | Self::Max | Self::Avg | Self::Count | Self::Greatest
        )
    }

    /// Returns true for tokens that terminate a token stream.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Eof | Self::Error)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The source text of the token, or the message of an error token.
    pub text: String,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character.
    pub column: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is an error token.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error)
    }

    /// Describes the token for diagnostics: the kind for end of input,
    /// otherwise the source text.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => String::from("end of input"),
            _ => format!("'{}'", self.text),
        }
    }
}
