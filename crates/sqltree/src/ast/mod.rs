//! Abstract Syntax Tree (AST) types for SQL queries.

mod node;

pub use node::{LimitClause, NodeKind, SyntaxTree};
pub(crate) use node::parse_unsigned;
