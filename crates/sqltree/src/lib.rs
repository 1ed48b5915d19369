//! # sqltree
//!
//! A lexer and recursive descent parser for SQL `SELECT` queries.
//!
//! This crate provides:
//! - A hand-written lexer that scans keywords, compound keywords such as
//!   `GROUP BY` or `LEFT JOIN`, function names, numbers, strings,
//!   identifiers and parameters
//! - A parser that turns the tokens into a generic [`SyntaxTree`] whose
//!   nodes record the token range they cover
//!
//! ## Parsing
//!
//! ```rust
//! use sqltree::{parse, NodeKind};
//!
//! let tree = parse("SELECT name, age FROM student WHERE age > 16 LIMIT 10").unwrap();
//! assert_eq!(tree.kind(), NodeKind::Query);
//!
//! let query = &tree.children()[0];
//! assert_eq!(
//!     query.child_kinds(),
//!     vec![NodeKind::Select, NodeKind::From, NodeKind::Where, NodeKind::Limit]
//! );
//! assert_eq!(query.child(NodeKind::Where).unwrap().text(), "WHERE age > 16");
//! ```
//!
//! ## Productions
//!
//! Every grammar production is available on [`Parser`] and can start at any
//! token index, which is useful to parse a fragment:
//!
//! ```rust
//! use sqltree::Parser;
//!
//! let parser = Parser::new("-12 + SUM(5 * g)").unwrap();
//! let expression = parser.parse_expression(0).unwrap();
//! assert_eq!(expression.end_index(), 8);
//! ```

pub mod ast;
pub mod lexer;
pub mod options;
pub mod parser;

pub use ast::{LimitClause, NodeKind, SyntaxTree};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use options::ParseOptions;
pub use parser::{ParseError, Parser};

/// Parses `text` as a complete query with the default options.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text cannot be tokenized, is empty, or
/// is not a valid query.
pub fn parse(text: &str) -> Result<SyntaxTree, ParseError> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parses `text` as a complete query.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text cannot be tokenized, is empty, or
/// is not a valid query.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<SyntaxTree, ParseError> {
    Parser::with_options(text, *options)?.parse()
}
