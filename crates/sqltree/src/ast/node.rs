//! The generic syntax tree node.

use core::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::lexer::Token;

/// The grammar construct a [`SyntaxTree`] node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// One or more select queries joined by `UNION`.
    Query,
    /// A single `SELECT ... FROM ...` with its optional clauses.
    SelectQuery,
    Select,
    From,
    Join,
    Where,
    Having,
    GroupBy,
    OrderBy,
    Limit,
    /// Expressions joined by `AND`/`OR`.
    Condition,
    /// Operands joined by operators, evaluated left to right.
    Expression,
    Operand,
    Operator,
    /// A `+` or `-` sign applied to the node it wraps.
    UnaryOperator,
    Function,
    Alias,
    /// A table name or a parenthesized subquery.
    Source,
    Parenthesis,
    ColumnName,
    /// `ASC` or `DESC`.
    Order,
    /// A select-list entry, or a group/order column with its direction.
    Field,
    /// The parenthesized value list of `IN (...)`.
    List,
}

impl NodeKind {
    /// Returns the name of the node kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::SelectQuery => "SelectQuery",
            Self::Select => "Select",
            Self::From => "From",
            Self::Join => "Join",
            Self::Where => "Where",
            Self::Having => "Having",
            Self::GroupBy => "GroupBy",
            Self::OrderBy => "OrderBy",
            Self::Limit => "Limit",
            Self::Condition => "Condition",
            Self::Expression => "Expression",
            Self::Operand => "Operand",
            Self::Operator => "Operator",
            Self::UnaryOperator => "UnaryOperator",
            Self::Function => "Function",
            Self::Alias => "Alias",
            Self::Source => "Source",
            Self::Parenthesis => "Parenthesis",
            Self::ColumnName => "ColumnName",
            Self::Order => "Order",
            Self::Field => "Field",
            Self::List => "List",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row count and offset of a `LIMIT` clause.
///
/// `LIMIT n`, `LIMIT n, m` and `LIMIT n OFFSET m` all normalize to
/// `row_count = n`; the offset is `m`, or zero for the first form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitClause {
    pub row_count: u64,
    pub offset: u64,
}

/// Parses an unsigned integer literal, decimal or `0x` hexadecimal.
pub(crate) fn parse_unsigned(text: &str) -> Option<u64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// A node of the syntax tree.
///
/// Every node covers the inclusive token range `start_index..=end_index`
/// of the token list it was parsed from. The list is shared by all nodes of
/// one parse, so cloning a node or keeping a subtree is cheap and never
/// outlives the tokens it points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    kind: NodeKind,
    children: Vec<SyntaxTree>,
    start: usize,
    end: usize,
    tokens: Arc<[Token]>,
}

impl SyntaxTree {
    pub(crate) fn new(
        kind: NodeKind,
        tokens: &Arc<[Token]>,
        start: usize,
        end: usize,
        children: Vec<Self>,
    ) -> Self {
        debug_assert!(start <= end && end < tokens.len());
        Self {
            kind,
            children,
            start,
            end,
            tokens: Arc::clone(tokens),
        }
    }

    pub(crate) fn leaf(kind: NodeKind, tokens: &Arc<[Token]>, start: usize, end: usize) -> Self {
        Self::new(kind, tokens, start, end, Vec::new())
    }

    /// Replaces a node holding exactly one child of one of `kinds` with
    /// that child.
    pub(crate) fn into_only_child(mut self, kinds: &[NodeKind]) -> Self {
        if self.children.len() == 1 && kinds.contains(&self.children[0].kind) {
            if let Some(child) = self.children.pop() {
                return child;
            }
        }
        self
    }

    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the child nodes in source order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Index of the first token covered by this node.
    #[must_use]
    pub const fn start_index(&self) -> usize {
        self.start
    }

    /// Index of the last token covered by this node.
    #[must_use]
    pub const fn end_index(&self) -> usize {
        self.end
    }

    /// The tokens covered by this node.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens[self.start..=self.end]
    }

    /// The complete token list of the parse this node belongs to.
    #[must_use]
    pub fn source_tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn first_token(&self) -> &Token {
        &self.tokens[self.start]
    }

    #[must_use]
    pub fn last_token(&self) -> &Token {
        &self.tokens[self.end]
    }

    /// Returns the first child of the given kind.
    #[must_use]
    pub fn child(&self, kind: NodeKind) -> Option<&Self> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Returns all children of the given kind.
    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &Self> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Returns the kinds of the direct children.
    #[must_use]
    pub fn child_kinds(&self) -> Vec<NodeKind> {
        self.children.iter().map(|c| c.kind).collect()
    }

    /// Joins the source text of the covered tokens with single spaces.
    ///
    /// This reproduces the parsed substring up to whitespace.
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens()
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns the normalized row count and offset of a `Limit` node.
    #[must_use]
    pub fn limit(&self) -> Option<LimitClause> {
        if self.kind != NodeKind::Limit {
            return None;
        }
        let row_count = parse_unsigned(&self.children.first()?.first_token().text)?;
        let offset = match self.children.get(1) {
            Some(node) => parse_unsigned(&node.first_token().text)?,
            None => 0,
        };
        Some(LimitClause { row_count, offset })
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(
            f,
            "{:indent$}{} [{}..{}]",
            "",
            self.kind,
            self.start,
            self.end,
            indent = depth * 2
        )?;
        if self.children.is_empty() {
            write!(f, " {}", self.text())?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
