//! SQL Parser
//!
//! A hand-written recursive descent parser producing a [`SyntaxTree`](crate::SyntaxTree).

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;
