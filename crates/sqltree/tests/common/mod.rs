#![allow(dead_code)]

use sqltree::{NodeKind, ParseError, Parser, SyntaxTree};

pub fn parse(sql: &str) -> SyntaxTree {
    sqltree::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    sqltree::parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parser(sql: &str) -> Parser {
    Parser::new(sql).unwrap_or_else(|e| panic!("Failed to tokenize: {sql}\nError: {e:?}"))
}

/// Parses a query that must consist of a single select query and returns
/// that select query.
pub fn select_query(sql: &str) -> SyntaxTree {
    let tree = parse(sql);
    assert_eq!(tree.kind(), NodeKind::Query);
    assert_eq!(tree.children().len(), 1, "expected one select query in {sql}");
    tree.children()[0].clone()
}

/// Returns the clause of `kind` of a single select query.
pub fn clause(sql: &str, kind: NodeKind) -> SyntaxTree {
    select_query(sql)
        .child(kind)
        .unwrap_or_else(|| panic!("no {kind} clause in {sql}"))
        .clone()
}

pub fn span(node: &SyntaxTree) -> (usize, usize) {
    (node.start_index(), node.end_index())
}

/// Verifies that every child lies inside its parent and that siblings are
/// ordered and do not overlap.
pub fn assert_well_formed(node: &SyntaxTree) {
    assert!(node.start_index() <= node.end_index());
    for child in node.children() {
        assert!(
            child.start_index() >= node.start_index() && child.end_index() <= node.end_index(),
            "{} {:?} escapes {} {:?}",
            child.kind(),
            span(child),
            node.kind(),
            span(node)
        );
        assert_well_formed(child);
    }
    for pair in node.children().windows(2) {
        assert!(pair[0].end_index() < pair[1].start_index());
    }
}
